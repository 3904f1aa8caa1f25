//! Environment variable handling module
//!
//! Reads negotiation settings from prefixed environment variables and parses
//! their values.

use reinhardt_negotiation::{DuplicatePolicy, NegotiationMode};
use std::env;

use super::ConfigError;

/// Prefix used by [`super::sources::EnvSource`] unless overridden
pub const DEFAULT_PREFIX: &str = "REINHARDT_NEGOTIATION_";

/// Environment variable reader with prefix support
#[derive(Debug, Clone)]
pub struct Env {
	/// Prefix for environment variables (e.g., "REINHARDT_NEGOTIATION_")
	pub prefix: String,
}

impl Env {
	pub fn new() -> Self {
		Self {
			prefix: DEFAULT_PREFIX.to_string(),
		}
	}

	/// Set a prefix for all environment variable lookups
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	/// Get the full key name with prefix
	pub fn key_name(&self, key: &str) -> String {
		format!("{}{}", self.prefix, key)
	}

	/// Read a string value, `None` when unset or not valid unicode
	pub fn str(&self, key: &str) -> Option<String> {
		env::var(self.key_name(key)).ok()
	}

	/// Read and parse a [`NegotiationMode`]
	pub fn mode(&self, key: &str) -> Result<Option<NegotiationMode>, ConfigError> {
		self.str(key)
			.map(|value| parse_mode(&self.key_name(key), &value))
			.transpose()
	}

	/// Read and parse a [`DuplicatePolicy`]
	pub fn duplicate_policy(&self, key: &str) -> Result<Option<DuplicatePolicy>, ConfigError> {
		self.str(key)
			.map(|value| parse_duplicate_policy(&self.key_name(key), &value))
			.transpose()
	}
}

impl Default for Env {
	fn default() -> Self {
		Self::new()
	}
}

/// Parses a negotiation mode, ignoring case and surrounding whitespace
///
/// # Examples
///
/// ```
/// use reinhardt_conf::settings::env::parse_mode;
/// use reinhardt_negotiation::NegotiationMode;
///
/// assert_eq!(parse_mode("MODE", " Lenient ").unwrap(), NegotiationMode::Lenient);
/// assert!(parse_mode("MODE", "sometimes").is_err());
/// ```
pub fn parse_mode(key: &str, value: &str) -> Result<NegotiationMode, ConfigError> {
	match value.trim().to_lowercase().as_str() {
		"strict" => Ok(NegotiationMode::Strict),
		"lenient" => Ok(NegotiationMode::Lenient),
		_ => Err(invalid(key, value)),
	}
}

/// Parses a duplicate registration policy, ignoring case and surrounding
/// whitespace
pub fn parse_duplicate_policy(key: &str, value: &str) -> Result<DuplicatePolicy, ConfigError> {
	match value.trim().to_lowercase().as_str() {
		"append" => Ok(DuplicatePolicy::Append),
		"reject" => Ok(DuplicatePolicy::Reject),
		"replace" => Ok(DuplicatePolicy::Replace),
		_ => Err(invalid(key, value)),
	}
}

fn invalid(key: &str, value: &str) -> ConfigError {
	ConfigError::InvalidValue {
		key: key.to_string(),
		value: value.to_string(),
	}
}
