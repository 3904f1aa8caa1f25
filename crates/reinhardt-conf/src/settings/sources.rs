//! Configuration sources for layered settings
//!
//! Sources are applied in the order they are added to a
//! [`super::SettingsBuilder`]; each one only overrides the keys it defines.

use reinhardt_negotiation::{DuplicatePolicy, NegotiationMode};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use super::env::Env;
use super::{ConfigError, NegotiationSettings};

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Override `settings` with the values this source defines
	fn apply(&self, settings: &mut NegotiationSettings) -> Result<(), ConfigError>;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// The keys a single source may define
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialSettings {
	mode: Option<NegotiationMode>,
	duplicate_policy: Option<DuplicatePolicy>,
	default_accept: Option<String>,
}

impl PartialSettings {
	fn merge_into(self, settings: &mut NegotiationSettings) {
		if let Some(mode) = self.mode {
			settings.mode = mode;
		}
		if let Some(policy) = self.duplicate_policy {
			settings.duplicate_policy = policy;
		}
		if let Some(accept) = self.default_accept {
			settings.default_accept = Some(accept);
		}
	}
}

/// Other tables in the document are ignored
#[derive(Debug, Default, Deserialize)]
struct Document {
	#[serde(default)]
	negotiation: PartialSettings,
}

/// TOML text configuration source
pub struct TomlSource {
	content: String,
}

impl TomlSource {
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
		}
	}
}

impl ConfigSource for TomlSource {
	fn apply(&self, settings: &mut NegotiationSettings) -> Result<(), ConfigError> {
		let document: Document = toml::from_str(&self.content)?;
		document.negotiation.merge_into(settings);
		Ok(())
	}

	fn description(&self) -> String {
		"TOML text".to_string()
	}
}

/// TOML file configuration source
pub struct TomlFileSource {
	path: PathBuf,
	required: bool,
}

impl TomlFileSource {
	/// Create a source for a file that must exist
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}

	/// Create a source that is skipped when the file does not exist
	pub fn optional(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}
}

impl ConfigSource for TomlFileSource {
	fn apply(&self, settings: &mut NegotiationSettings) -> Result<(), ConfigError> {
		if !self.required && !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "optional settings file not found");
			return Ok(());
		}

		let content = fs::read_to_string(&self.path).map_err(|e| ConfigError::Io {
			path: self.path.clone(),
			source: e,
		})?;
		TomlSource::new(content).apply(settings)
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>MODE`, `<PREFIX>DUPLICATE_POLICY` and
/// `<PREFIX>DEFAULT_ACCEPT`.
#[derive(Default)]
pub struct EnvSource {
	env: Env,
}

impl EnvSource {
	/// Create a source using the `REINHARDT_NEGOTIATION_` prefix
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the prefix for environment variables
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_conf::settings::sources::EnvSource;
	///
	/// let source = EnvSource::new().with_prefix("APP_NEGOTIATION_");
	/// ```
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env = self.env.with_prefix(prefix);
		self
	}
}

impl ConfigSource for EnvSource {
	fn apply(&self, settings: &mut NegotiationSettings) -> Result<(), ConfigError> {
		PartialSettings {
			mode: self.env.mode("MODE")?,
			duplicate_policy: self.env.duplicate_policy("DUPLICATE_POLICY")?,
			default_accept: self.env.str("DEFAULT_ACCEPT"),
		}
		.merge_into(settings);
		Ok(())
	}

	fn description(&self) -> String {
		format!("Environment variables: {}*", self.env.prefix)
	}
}
