//! Negotiation settings
//!
//! [`NegotiationSettings`] configures how the provider registry handles
//! duplicate registrations, whether negotiation aborts or skips on entries a
//! handler cannot produce, and which Accept value stands in for a missing
//! header.

pub mod env;
pub mod sources;
pub mod testing;

use bytes::Bytes;
use http::{HeaderMap, Response};
use reinhardt_negotiation::response;
use reinhardt_negotiation::{
	ContentNegotiator, DuplicatePolicy, Model, NegotiationMode, ProducedContentTypes,
	ProviderRegistry,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use self::sources::{ConfigSource, EnvSource, TomlFileSource, TomlSource};

/// Error type for settings loading
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid value for {key}: {value:?}")]
	InvalidValue { key: String, value: String },
}

/// Settings for content negotiation
///
/// Defaults reproduce the classic behavior: strict negotiation and duplicate
/// registrations appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationSettings {
	/// Abort or skip on Accept entries the handler does not produce
	pub mode: NegotiationMode,
	/// Handling of a content type registered twice
	pub duplicate_policy: DuplicatePolicy,
	/// Accept value used when a request carries no Accept header
	pub default_accept: Option<String>,
}

impl NegotiationSettings {
	/// Creates settings with default values
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_conf::NegotiationSettings;
	/// use reinhardt_negotiation::{DuplicatePolicy, NegotiationMode};
	///
	/// let settings = NegotiationSettings::new();
	/// assert_eq!(settings.mode, NegotiationMode::Strict);
	/// assert_eq!(settings.duplicate_policy, DuplicatePolicy::Append);
	/// assert_eq!(settings.default_accept, None);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn builder() -> SettingsBuilder {
		SettingsBuilder::new()
	}

	/// Parses settings from the `[negotiation]` table of a TOML document.
	/// Missing keys keep their defaults.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_conf::NegotiationSettings;
	/// use reinhardt_negotiation::DuplicatePolicy;
	///
	/// let settings = NegotiationSettings::from_toml(
	///     "[negotiation]\nduplicate_policy = \"reject\"",
	/// ).unwrap();
	/// assert_eq!(settings.duplicate_policy, DuplicatePolicy::Reject);
	/// ```
	pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
		Self::builder().add_source(TomlSource::new(content)).build()
	}

	/// Loads settings from a TOML file
	///
	/// # Errors
	///
	/// Returns error if file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		Self::builder()
			.add_source(TomlFileSource::new(path.as_ref()))
			.build()
	}

	/// Overrides these settings with `REINHARDT_NEGOTIATION_*` environment
	/// variables
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidValue`] when a variable holds an unknown
	/// mode or policy, or the result fails [`NegotiationSettings::validate`].
	pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
		EnvSource::new().apply(&mut self)?;
		self.validate()?;
		Ok(self)
	}

	/// Checks values that deserialize fine but cannot be used
	pub fn validate(&self) -> Result<(), ConfigError> {
		if let Some(accept) = &self.default_accept
			&& accept.trim().is_empty()
		{
			return Err(ConfigError::InvalidValue {
				key: "default_accept".to_string(),
				value: accept.clone(),
			});
		}
		Ok(())
	}

	/// An empty registry using the configured duplicate policy
	pub fn registry(&self) -> ProviderRegistry {
		ProviderRegistry::with_policy(self.duplicate_policy)
	}

	/// A negotiator over `registry` using the configured mode
	pub fn negotiator<'r>(&self, registry: &'r ProviderRegistry) -> ContentNegotiator<'r> {
		ContentNegotiator::new(registry).with_mode(self.mode)
	}

	/// Renders `model` with [`response::respond`], filling in the configured
	/// default Accept value
	pub fn respond(
		&self,
		negotiator: &ContentNegotiator<'_>,
		headers: &HeaderMap,
		produces: &ProducedContentTypes,
		model: &dyn Model,
	) -> Response<Bytes> {
		response::respond(
			negotiator,
			headers,
			self.default_accept.as_deref(),
			produces,
			model,
		)
	}
}

/// Applies configuration sources on top of the defaults, in insertion order
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a source; later sources override earlier ones
	pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Applies every source and validates the result
	pub fn build(self) -> Result<NegotiationSettings, ConfigError> {
		let mut settings = NegotiationSettings::default();
		for source in &self.sources {
			source.apply(&mut settings)?;
			tracing::debug!(source = %source.description(), "applied settings source");
		}
		settings.validate()?;
		Ok(settings)
	}
}
