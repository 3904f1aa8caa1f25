//! End-to-end negotiation tests: registry, handler capabilities, negotiator
//! and HTTP response together

use std::sync::Arc;

use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use http::StatusCode;
use reinhardt_conneg_integration_tests::{Article, PlainTextProvider};
use reinhardt_negotiation::response::respond;
use reinhardt_negotiation::{
	ContentNegotiator, ContentType, JsonProvider, NegotiationMode, NoProviderReason,
	ProducedContentTypes, Provider, ProviderRegistry,
};
use rstest::{fixture, rstest};

#[fixture]
fn registry() -> ProviderRegistry {
	let mut registry = ProviderRegistry::new();
	registry.register_provider(JsonProvider::new()).unwrap();
	registry.register_provider(PlainTextProvider).unwrap();
	registry
}

#[fixture]
fn produces() -> ProducedContentTypes {
	ProducedContentTypes::new()
		.with(ContentType::new("application/json"))
		.with(ContentType::new("text/plain"))
}

fn headers(accept: &'static str) -> HeaderMap {
	let mut headers = HeaderMap::new();
	headers.insert(ACCEPT, HeaderValue::from_static(accept));
	headers
}

#[rstest]
#[case("application/json", "application/json", "{\"id\":1,\"published\":true,\"title\":\"Hi\"}")]
#[case("text/plain", "text/plain", "id=1\npublished=true\ntitle=Hi\n")]
#[case(
	"text/plain; q=0.2, application/json",
	"text/plain",
	"id=1\npublished=true\ntitle=Hi\n"
)]
fn test_response_rendered_by_selected_provider(
	registry: ProviderRegistry,
	produces: ProducedContentTypes,
	#[case] accept: &'static str,
	#[case] content_type: &str,
	#[case] body: &str,
) {
	// Arrange
	let negotiator = ContentNegotiator::new(&registry);

	// Act
	let response = respond(
		&negotiator,
		&headers(accept),
		None,
		&produces,
		&Article::new(1, "Hi"),
	);

	// Assert
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers()[CONTENT_TYPE], content_type);
	assert_eq!(response.body().as_ref(), body.as_bytes());
}

#[rstest]
fn test_empty_accept_header_is_not_acceptable(
	registry: ProviderRegistry,
	produces: ProducedContentTypes,
) {
	let negotiator = ContentNegotiator::new(&registry);

	let response = respond(&negotiator, &headers(""), None, &produces, &Article::new(1, "Hi"));

	assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[rstest]
fn test_unsupported_first_entry_aborts_in_strict_mode(
	registry: ProviderRegistry,
	produces: ProducedContentTypes,
) {
	// Arrange
	let strict = ContentNegotiator::new(&registry);
	let lenient = strict.with_mode(NegotiationMode::Lenient);
	let accept = headers("application/xml, application/json");

	// Act
	let strict_response = respond(&strict, &accept, None, &produces, &Article::new(1, "Hi"));
	let lenient_response = respond(&lenient, &accept, None, &produces, &Article::new(1, "Hi"));

	// Assert
	assert_eq!(strict_response.status(), StatusCode::NOT_ACCEPTABLE);
	assert_eq!(lenient_response.status(), StatusCode::OK);
	assert_eq!(lenient_response.headers()[CONTENT_TYPE], "application/json");
}

#[rstest]
fn test_handler_without_plain_text(registry: ProviderRegistry) {
	// Arrange
	let json_only = ProducedContentTypes::new().with(ContentType::new("application/json"));
	let negotiator = ContentNegotiator::new(&registry);

	// Act
	let err = negotiator.select("text/plain", &json_only).unwrap_err();

	// Assert
	assert_eq!(err.reason(), NoProviderReason::UnsupportedMediaType);
	assert_eq!(err.media_type(), Some("text/plain"));
}

#[rstest]
fn test_plain_text_rejects_non_object(registry: ProviderRegistry, produces: ProducedContentTypes) {
	let negotiator = ContentNegotiator::new(&registry);

	let response = respond(
		&negotiator,
		&headers("text/plain"),
		None,
		&produces,
		&vec!["a", "b"],
	);

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[rstest]
fn test_registry_shared_behind_arc(produces: ProducedContentTypes) {
	let mut registry = ProviderRegistry::new();
	let json: Arc<dyn Provider> = Arc::new(JsonProvider::new());
	registry
		.register(ContentType::new("application/json"), Arc::clone(&json))
		.unwrap();
	let registry = Arc::new(registry);

	let first = ContentNegotiator::new(&registry)
		.select("application/json", &produces)
		.unwrap();
	let second = ContentNegotiator::new(&registry)
		.select("application/json", &produces)
		.unwrap();

	assert!(Arc::ptr_eq(&first, &json));
	assert!(Arc::ptr_eq(&first, &second));
}
