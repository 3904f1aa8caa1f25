//! Settings driving registry, negotiator and response behavior

use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use http::StatusCode;
use reinhardt_conf::settings::sources::{EnvSource, TomlFileSource};
use reinhardt_conf::settings::testing::TestEnv;
use reinhardt_conf::{ConfigError, NegotiationSettings};
use reinhardt_conneg_integration_tests::{Article, PlainTextProvider};
use reinhardt_negotiation::{
	ContentType, DuplicatePolicy, JsonProvider, NegotiationMode, ProducedContentTypes,
	RegistryError,
};
use rstest::{fixture, rstest};
use serial_test::serial;

const SETTINGS: &str = r#"
[negotiation]
mode = "lenient"
duplicate_policy = "reject"
default_accept = "text/plain"
"#;

#[fixture]
fn produces() -> ProducedContentTypes {
	ProducedContentTypes::new()
		.with(ContentType::new("application/json"))
		.with(ContentType::new("text/plain"))
}

#[rstest]
fn test_file_settings_shape_negotiation(produces: ProducedContentTypes) {
	// Arrange
	let test_env = TestEnv::new().unwrap();
	let path = test_env
		.create_config_file("reinhardt.toml", SETTINGS)
		.unwrap();
	let settings = NegotiationSettings::from_file(&path).unwrap();
	let mut registry = settings.registry();
	registry.register_provider(JsonProvider::new()).unwrap();
	registry.register_provider(PlainTextProvider).unwrap();
	let duplicate = registry.register_provider(JsonProvider::new());
	let negotiator = settings.negotiator(&registry);

	let mut accept_xml_first = HeaderMap::new();
	accept_xml_first.insert(
		ACCEPT,
		HeaderValue::from_static("application/xml, application/json"),
	);

	// Act
	let skipped = settings.respond(&negotiator, &accept_xml_first, &produces, &Article::new(3, "a"));
	let defaulted = settings.respond(&negotiator, &HeaderMap::new(), &produces, &Article::new(3, "a"));

	// Assert
	assert_eq!(
		duplicate,
		Err(RegistryError::Duplicate(ContentType::new("application/json")))
	);
	assert_eq!(skipped.status(), StatusCode::OK);
	assert_eq!(skipped.headers()[CONTENT_TYPE], "application/json");
	assert_eq!(defaulted.status(), StatusCode::OK);
	assert_eq!(defaulted.headers()[CONTENT_TYPE], "text/plain");
}

#[rstest]
fn test_missing_accept_without_default_is_not_acceptable(produces: ProducedContentTypes) {
	let settings = NegotiationSettings::new();
	let mut registry = settings.registry();
	registry.register_provider(JsonProvider::new()).unwrap();
	let negotiator = settings.negotiator(&registry);

	let response = settings.respond(&negotiator, &HeaderMap::new(), &produces, &Article::new(1, "a"));

	assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[rstest]
#[serial(env)]
fn test_environment_overrides_file() {
	// Arrange
	let mut test_env = TestEnv::new().unwrap();
	let path = test_env
		.create_config_file("reinhardt.toml", SETTINGS)
		.unwrap();
	test_env.set_var("SETTINGS_IT_MODE", "STRICT");
	test_env.set_var("SETTINGS_IT_DUPLICATE_POLICY", "replace");
	test_env.remove_var("SETTINGS_IT_DEFAULT_ACCEPT");

	// Act
	let settings = NegotiationSettings::builder()
		.add_source(TomlFileSource::new(&path))
		.add_source(EnvSource::new().with_prefix("SETTINGS_IT_"))
		.build()
		.unwrap();

	// Assert
	assert_eq!(settings.mode, NegotiationMode::Strict);
	assert_eq!(settings.duplicate_policy, DuplicatePolicy::Replace);
	assert_eq!(settings.default_accept.as_deref(), Some("text/plain"));
}

#[rstest]
#[serial(env)]
fn test_blank_default_accept_from_environment_is_rejected() {
	let mut test_env = TestEnv::new().unwrap();
	test_env.set_var("SETTINGS_BLANK_DEFAULT_ACCEPT", " ");

	let result = NegotiationSettings::builder()
		.add_source(EnvSource::new().with_prefix("SETTINGS_BLANK_"))
		.build();

	assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[rstest]
fn test_optional_file_falls_back_to_defaults() {
	let test_env = TestEnv::new().unwrap();

	let settings = NegotiationSettings::builder()
		.add_source(TomlFileSource::optional(test_env.path().join("absent.toml")))
		.build()
		.unwrap();

	assert_eq!(settings, NegotiationSettings::default());
}
