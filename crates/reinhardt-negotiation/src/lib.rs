//! # Reinhardt Negotiation
//!
//! Provider-based content negotiation for Reinhardt.
//!
//! Applications register one [`Provider`] per [`ContentType`] during startup.
//! For every request, [`ContentNegotiator`] parses the client's `Accept`
//! header and picks the single provider that the handler produces and the
//! client asked for.
//!
//! ## Components
//!
//! - [`content_type`]: media type plus optional vendor and version
//! - [`accept`]: Accept header parsing that keeps header order
//! - [`provider`]: the [`Provider`] capability and [`JsonProvider`]
//! - [`registry`]: [`ProviderRegistry`] keyed by base media type
//! - [`produces`]: [`ProducedContentTypes`] declared by a handler
//! - [`negotiator`]: the selection algorithm
//! - [`response`]: building an `http::Response` from the result
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use reinhardt_negotiation::{
//!     ContentNegotiator, ContentType, JsonProvider, NoProviderReason, ProducedContentTypes,
//!     ProviderRegistry,
//! };
//! use serde_json::json;
//!
//! let mut registry = ProviderRegistry::new();
//! registry.register_provider(JsonProvider::new()).unwrap();
//! registry
//!     .register(
//!         ContentType::new("application/json").with_version("2"),
//!         Arc::new(JsonProvider::new().pretty(true)),
//!     )
//!     .unwrap();
//!
//! let produces = ProducedContentTypes::new()
//!     .with(ContentType::new("application/json"))
//!     .with(ContentType::new("application/json").with_version("2"));
//! let negotiator = ContentNegotiator::new(&registry);
//!
//! let provider = negotiator.select("application/json; version=2", &produces).unwrap();
//! let body = provider.provide(&json!({"id": 1})).unwrap();
//! assert!(body.starts_with(b"{\n"));
//!
//! let err = negotiator.select("text/html", &produces).unwrap_err();
//! assert_eq!(err.reason(), NoProviderReason::UnsupportedMediaType);
//! ```

pub mod accept;
pub mod content_type;
pub mod error;
pub mod negotiator;
pub mod produces;
pub mod provider;
pub mod registry;
pub mod response;

pub use accept::{AcceptHeader, AcceptPreference};
pub use content_type::ContentType;
pub use error::{
	ContentTypeParseError, NoProviderFound, NoProviderReason, ProvideError, RegistryError,
};
pub use negotiator::{ContentNegotiator, NegotiationMode, Negotiated};
pub use produces::ProducedContentTypes;
pub use provider::{JsonProvider, Model, Provider};
pub use registry::{DuplicatePolicy, ProviderRegistration, ProviderRegistry};
