//! Provider registry keyed by base media type

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::content_type::ContentType;
use super::error::RegistryError;
use super::provider::Provider;

/// How [`ProviderRegistry::register`] treats a content type that is already
/// registered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
	/// Keep both entries. Negotiation treats the pair as ambiguous and moves on
	/// to the next Accept preference.
	#[default]
	Append,
	/// Refuse the second registration
	Reject,
	/// Overwrite the earlier entry in place
	Replace,
}

/// A provider together with the content type it was registered under
#[derive(Debug, Clone)]
pub struct ProviderRegistration {
	pub content_type: ContentType,
	pub provider: Arc<dyn Provider>,
}

/// Table of providers, filled during application startup
///
/// Registration takes `&mut self`, so the table is complete before it is
/// shared (by reference or `Arc`) with request handling code. Reads need no
/// locking.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_negotiation::{ContentType, JsonProvider, ProviderRegistry};
///
/// let mut registry = ProviderRegistry::new();
/// registry
///     .register(ContentType::new("application/json"), Arc::new(JsonProvider::new()))
///     .unwrap();
///
/// assert_eq!(registry.lookup("application/json").len(), 1);
/// assert!(registry.lookup("text/html").is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ProviderRegistry {
	entries: HashMap<String, Vec<ProviderRegistration>>,
	policy: DuplicatePolicy,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_policy(policy: DuplicatePolicy) -> Self {
		Self {
			entries: HashMap::new(),
			policy,
		}
	}

	pub fn policy(&self) -> DuplicatePolicy {
		self.policy
	}

	/// Registers `provider` under `content_type`
	///
	/// # Errors
	///
	/// Returns [`RegistryError::Duplicate`] when the content type is already
	/// registered and the policy is [`DuplicatePolicy::Reject`].
	pub fn register(
		&mut self,
		content_type: ContentType,
		provider: Arc<dyn Provider>,
	) -> Result<(), RegistryError> {
		let registrations = self
			.entries
			.entry(content_type.media_type().to_string())
			.or_default();

		let existing = registrations
			.iter()
			.position(|r| r.content_type == content_type);

		match (existing, self.policy) {
			(None, _) => {
				tracing::debug!(content_type = %content_type, "registered provider");
				registrations.push(ProviderRegistration {
					content_type,
					provider,
				});
			}
			(Some(_), DuplicatePolicy::Append) => {
				tracing::warn!(
					content_type = %content_type,
					"duplicate provider registration, negotiation for this content type will be ambiguous"
				);
				registrations.push(ProviderRegistration {
					content_type,
					provider,
				});
			}
			(Some(_), DuplicatePolicy::Reject) => {
				tracing::warn!(content_type = %content_type, "rejected duplicate provider registration");
				return Err(RegistryError::Duplicate(content_type));
			}
			(Some(index), DuplicatePolicy::Replace) => {
				tracing::warn!(content_type = %content_type, "replaced existing provider registration");
				registrations[index].provider = provider;
			}
		}

		Ok(())
	}

	/// Registers a provider under the content type it declares
	pub fn register_provider<P>(&mut self, provider: P) -> Result<(), RegistryError>
	where
		P: Provider + 'static,
	{
		let content_type = provider.content_type();
		self.register(content_type, Arc::new(provider))
	}

	/// Entries registered for a base media type, in registration order
	pub fn lookup(&self, media_type: &str) -> &[ProviderRegistration] {
		self.entries
			.get(media_type)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	pub fn media_types(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Total number of registrations
	pub fn len(&self) -> usize {
		self.entries.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
