//! Provider capability and the default JSON provider

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::content_type::ContentType;
use super::error::ProvideError;

/// Media type served by [`JsonProvider`]
pub const APPLICATION_JSON: &str = "application/json";

/// A domain model that knows how to turn itself into a generic representation.
///
/// Every `serde::Serialize` type gets this for free.
pub trait Model: Send + Sync {
	fn to_representation(&self) -> Result<Value, ProvideError>;
}

impl<T> Model for T
where
	T: Serialize + Send + Sync,
{
	fn to_representation(&self) -> Result<Value, ProvideError> {
		Ok(serde_json::to_value(self)?)
	}
}

/// Serializes models into the wire format of a single content type.
///
/// Providers are registered into a [`crate::ProviderRegistry`] at startup and
/// handed out by [`crate::ContentNegotiator`] once per request.
pub trait Provider: Send + Sync {
	/// The content type this provider registers under
	fn content_type(&self) -> ContentType;

	/// Produces the response body for `model`
	fn provide(&self, model: &dyn Model) -> Result<Bytes, ProvideError>;
}

impl fmt::Debug for dyn Provider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Provider")
			.field("content_type", &self.content_type())
			.finish()
	}
}

/// JSON provider
///
/// Renders a model's representation as JSON text.
#[derive(Debug, Clone, Default)]
pub struct JsonProvider {
	/// Whether to pretty-print the output
	pub pretty: bool,
}

impl JsonProvider {
	/// Creates a new JSON provider with compact output
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::{ContentType, JsonProvider, Provider};
	///
	/// let provider = JsonProvider::new();
	/// assert!(!provider.pretty);
	/// assert_eq!(provider.content_type(), ContentType::new("application/json"));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets whether to pretty-print
	pub fn pretty(mut self, pretty: bool) -> Self {
		self.pretty = pretty;
		self
	}
}

impl Provider for JsonProvider {
	fn content_type(&self) -> ContentType {
		ContentType::new(APPLICATION_JSON)
	}

	fn provide(&self, model: &dyn Model) -> Result<Bytes, ProvideError> {
		let value = model.to_representation()?;
		let body = if self.pretty {
			serde_json::to_vec_pretty(&value)?
		} else {
			serde_json::to_vec(&value)?
		};
		Ok(Bytes::from(body))
	}
}
