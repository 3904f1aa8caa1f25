//! Integration test utilities for Reinhardt content negotiation
//!
//! Shared models and providers used across the negotiation integration tests.

use bytes::Bytes;
use reinhardt_negotiation::{ContentType, Model, ProvideError, Provider};
use serde::Serialize;
use serde_json::Value;

/// Sample model rendered by the test providers
#[derive(Debug, Clone, Serialize)]
pub struct Article {
	pub id: u64,
	pub title: String,
	pub published: bool,
}

impl Article {
	pub fn new(id: u64, title: &str) -> Self {
		Self {
			id,
			title: title.to_string(),
			published: true,
		}
	}
}

/// Renders flat objects as `key=value` lines
#[derive(Debug, Clone)]
pub struct PlainTextProvider;

impl Provider for PlainTextProvider {
	fn content_type(&self) -> ContentType {
		ContentType::new("text/plain")
	}

	fn provide(&self, model: &dyn Model) -> Result<Bytes, ProvideError> {
		let Value::Object(fields) = model.to_representation()? else {
			return Err(ProvideError::UnsupportedModel(
				"text/plain needs an object".to_string(),
			));
		};

		let mut out = String::new();
		for (key, value) in fields {
			let value = match value {
				Value::String(s) => s,
				other => other.to_string(),
			};
			out.push_str(&format!("{}={}\n", key, value));
		}
		Ok(Bytes::from(out))
	}
}

/// Wraps the representation in an envelope tagged with a version, standing in
/// for a versioned vendor API
#[derive(Debug, Clone)]
pub struct EnvelopeProvider {
	pub vendor: &'static str,
	pub version: &'static str,
}

impl Provider for EnvelopeProvider {
	fn content_type(&self) -> ContentType {
		ContentType::new("application/json")
			.with_vendor(self.vendor)
			.with_version(self.version)
	}

	fn provide(&self, model: &dyn Model) -> Result<Bytes, ProvideError> {
		let envelope = serde_json::json!({
			"version": self.version,
			"data": model.to_representation()?,
		});
		Ok(Bytes::from(serde_json::to_vec(&envelope)?))
	}
}
