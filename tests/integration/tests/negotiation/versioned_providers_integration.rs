//! Vendor and version qualified providers registered side by side

use std::sync::Arc;

use reinhardt_conneg_integration_tests::{Article, EnvelopeProvider};
use reinhardt_negotiation::{
	ContentNegotiator, ContentType, DuplicatePolicy, JsonProvider, NoProviderReason,
	ProducedContentTypes, Provider, ProviderRegistry, RegistryError,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const V1: EnvelopeProvider = EnvelopeProvider {
	vendor: "acme",
	version: "1",
};
const V2: EnvelopeProvider = EnvelopeProvider {
	vendor: "acme",
	version: "2",
};

#[fixture]
fn registry() -> ProviderRegistry {
	let mut registry = ProviderRegistry::new();
	registry.register_provider(JsonProvider::new()).unwrap();
	registry.register_provider(V1).unwrap();
	registry.register_provider(V2).unwrap();
	registry
}

fn render(provider: &Arc<dyn Provider>) -> Value {
	let body = provider.provide(&Article::new(9, "Versioned")).unwrap();
	serde_json::from_slice(&body).unwrap()
}

#[rstest]
fn test_versions_resolve_to_their_own_provider(registry: ProviderRegistry) {
	// Arrange
	let produces: ProducedContentTypes = [V1.content_type(), V2.content_type()]
		.into_iter()
		.chain(std::iter::once(ContentType::new("application/json")))
		.collect();
	let negotiator = ContentNegotiator::new(&registry);

	// Act
	let v1 = negotiator
		.select("application/json; vendor=acme; version=1", &produces)
		.unwrap();
	let v2 = negotiator
		.select("application/json; version=2; vendor=acme", &produces)
		.unwrap();
	let plain = negotiator.select("application/json", &produces).unwrap();

	// Assert
	assert_eq!(render(&v1)["version"], json!("1"));
	assert_eq!(render(&v2)["version"], json!("2"));
	assert_eq!(render(&plain)["id"], json!(9));
}

#[rstest]
fn test_handler_limits_versions(registry: ProviderRegistry) {
	// Arrange: the handler has not migrated to v2 yet
	let produces = ProducedContentTypes::new()
		.with(ContentType::new("application/json"))
		.with(V1.content_type());
	let negotiator = ContentNegotiator::new(&registry);

	// Act
	let err = negotiator
		.select("application/json; vendor=acme; version=2", &produces)
		.unwrap_err();

	// Assert
	assert_eq!(err.reason(), NoProviderReason::DisallowedVariant);
}

#[rstest]
fn test_allowed_but_unregistered_variant_tries_next_entry(registry: ProviderRegistry) {
	// Arrange: v3 is declared by the handler but no provider exists
	let v3 = ContentType::new("application/json")
		.with_vendor("acme")
		.with_version("3");
	let produces = ProducedContentTypes::new()
		.with(v3)
		.with(ContentType::new("application/json"));
	let negotiator = ContentNegotiator::new(&registry);

	// Act
	let negotiated = negotiator
		.negotiate(
			"application/json; vendor=acme; version=3, application/json",
			&produces,
		)
		.unwrap();
	let only_v3 = negotiator
		.select("application/json; vendor=acme; version=3", &produces)
		.unwrap_err();

	// Assert
	assert_eq!(negotiated.content_type, ContentType::new("application/json"));
	assert_eq!(only_v3.reason(), NoProviderReason::NoUniqueMatch);
}

#[rstest]
fn test_duplicate_append_makes_negotiation_ambiguous() {
	let mut registry = ProviderRegistry::with_policy(DuplicatePolicy::Append);
	registry.register_provider(V1).unwrap();
	registry.register_provider(V1).unwrap();
	let produces = ProducedContentTypes::new().with(V1.content_type());

	let err = ContentNegotiator::new(&registry)
		.select("application/json; vendor=acme; version=1", &produces)
		.unwrap_err();

	assert_eq!(registry.lookup("application/json").len(), 2);
	assert_eq!(err.reason(), NoProviderReason::NoUniqueMatch);
}

#[rstest]
fn test_duplicate_reject_and_replace_keep_negotiation_unambiguous() {
	// Arrange
	let mut rejecting = ProviderRegistry::with_policy(DuplicatePolicy::Reject);
	let mut replacing = ProviderRegistry::with_policy(DuplicatePolicy::Replace);
	let produces = ProducedContentTypes::new().with(V1.content_type());

	// Act
	rejecting.register_provider(V1).unwrap();
	let rejected = rejecting.register_provider(V1);
	replacing.register_provider(V1).unwrap();
	replacing.register_provider(V1).unwrap();

	// Assert
	assert_eq!(rejected, Err(RegistryError::Duplicate(V1.content_type())));
	for registry in [&rejecting, &replacing] {
		assert_eq!(registry.lookup("application/json").len(), 1);
		assert!(
			ContentNegotiator::new(registry)
				.select("application/json; vendor=acme; version=1", &produces)
				.is_ok()
		);
	}
}
