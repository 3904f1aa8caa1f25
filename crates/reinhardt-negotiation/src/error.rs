//! Error types for content negotiation

use http::StatusCode;

use super::content_type::ContentType;

/// Why negotiation could not produce a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum NoProviderReason {
	/// The Accept header was the empty string
	#[error("empty accept header")]
	EmptyHeader,
	/// A requested media type is not produced by the handler
	#[error("unsupported media type")]
	UnsupportedMediaType,
	/// A requested vendor/version variant is not produced by the handler
	#[error("disallowed content type variant")]
	DisallowedVariant,
	/// No preference resolved to exactly one registered provider
	#[error("no unique provider match")]
	NoUniqueMatch,
}

impl NoProviderReason {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::EmptyHeader => "empty accept header",
			Self::UnsupportedMediaType => "unsupported media type",
			Self::DisallowedVariant => "disallowed content type variant",
			Self::NoUniqueMatch => "no unique provider match",
		}
	}
}

/// Negotiation failure
///
/// This is the only error [`crate::ContentNegotiator`] returns. The reason and
/// the offending media type are carried for diagnostics; callers normally
/// answer with [`NoProviderFound::status_code`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No provider found: {reason}{}", media_type_suffix(.media_type))]
pub struct NoProviderFound {
	reason: NoProviderReason,
	media_type: Option<String>,
}

impl NoProviderFound {
	pub fn new(reason: NoProviderReason) -> Self {
		Self {
			reason,
			media_type: None,
		}
	}

	pub fn for_media_type(reason: NoProviderReason, media_type: impl Into<String>) -> Self {
		Self {
			reason,
			media_type: Some(media_type.into()),
		}
	}

	pub fn reason(&self) -> NoProviderReason {
		self.reason
	}

	/// The media type that triggered the failure, when one did
	pub fn media_type(&self) -> Option<&str> {
		self.media_type.as_deref()
	}

	/// HTTP status a caller should answer with
	pub fn status_code(&self) -> StatusCode {
		StatusCode::NOT_ACCEPTABLE
	}
}

fn media_type_suffix(media_type: &Option<String>) -> String {
	media_type
		.as_deref()
		.map(|media_type| format!(" ({})", media_type))
		.unwrap_or_default()
}

/// Error raised while building a [`crate::ProviderRegistry`]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("Provider already registered for {0}")]
	Duplicate(ContentType),
}

/// Error raised by a [`crate::Provider`] while producing a body
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ProvideError {
	#[error("Serialization error: {0}")]
	Serialization(String),

	#[error("Unsupported model: {0}")]
	UnsupportedModel(String),
}

impl From<serde_json::Error> for ProvideError {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialization(err.to_string())
	}
}

/// Error returned when parsing a [`ContentType`] from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentTypeParseError {
	#[error("Empty content type")]
	Empty,

	#[error("Expected a single content type, got a list: {0}")]
	MultipleEntries(String),
}
