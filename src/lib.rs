//! # Reinhardt Conneg
//!
//! Provider-based content negotiation for Reinhardt, inspired by Django REST
//! Framework's renderer selection.
//!
//! An application registers one provider per content type at startup. For
//! every request the negotiator reads the client's `Accept` header, checks it
//! against the content types the handler produces, and hands back exactly one
//! provider to serialize the response.
//!
//! ## Feature Flags
//!
//! - `negotiation` - Accept parsing, provider registry and negotiator
//! - `conf` - Layered settings (TOML file, environment variables)
//! - `full` (default) - Everything above
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_conneg::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: i64,
//!     username: String,
//! }
//!
//! let settings = NegotiationSettings::from_toml("[negotiation]\nmode = \"strict\"").unwrap();
//!
//! // Startup: register providers explicitly
//! let mut registry = settings.registry();
//! registry.register_provider(JsonProvider::new()).unwrap();
//!
//! // Per handler: declare what it produces
//! let produces = ProducedContentTypes::new().with(ContentType::new("application/json"));
//!
//! // Per request: negotiate
//! let negotiator = settings.negotiator(&registry);
//! let provider = negotiator.select("application/json", &produces).unwrap();
//! let body = provider
//!     .provide(&User { id: 1, username: "alice".to_string() })
//!     .unwrap();
//! assert_eq!(body.as_ref(), br#"{"id":1,"username":"alice"}"#);
//! ```

#[cfg(feature = "negotiation")]
pub use reinhardt_negotiation as negotiation;

#[cfg(feature = "conf")]
pub use reinhardt_conf as conf;

// Re-export negotiation types
#[cfg(feature = "negotiation")]
pub use reinhardt_negotiation::{
	AcceptHeader, AcceptPreference, ContentNegotiator, ContentType, DuplicatePolicy, JsonProvider,
	Model, NegotiationMode, Negotiated, NoProviderFound, NoProviderReason, ProvideError,
	ProducedContentTypes, Provider, ProviderRegistry, RegistryError,
};

// Re-export settings
#[cfg(feature = "conf")]
pub use reinhardt_conf::{ConfigError, NegotiationSettings};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "negotiation")]
	pub use reinhardt_negotiation::{
		ContentNegotiator, ContentType, JsonProvider, Model, NegotiationMode, NoProviderFound,
		ProducedContentTypes, Provider, ProviderRegistry,
	};

	#[cfg(feature = "conf")]
	pub use reinhardt_conf::NegotiationSettings;
}
