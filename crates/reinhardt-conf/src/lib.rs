//! # Reinhardt Configuration
//!
//! Layered settings for Reinhardt content negotiation.
//!
//! Settings start from defaults and are overridden, in order, by every
//! [`settings::sources::ConfigSource`] added to the builder: typically a TOML
//! file followed by environment variables.
//!
//! ## Quick Start
//!
//! ```rust
//! use reinhardt_conf::settings::NegotiationSettings;
//! use reinhardt_conf::settings::sources::{EnvSource, TomlSource};
//! use reinhardt_negotiation::{JsonProvider, NegotiationMode};
//!
//! let settings = NegotiationSettings::builder()
//!     .add_source(TomlSource::new("[negotiation]\nmode = \"lenient\""))
//!     .add_source(EnvSource::new().with_prefix("DOCTEST_UNSET_PREFIX_"))
//!     .build()
//!     .unwrap();
//! assert_eq!(settings.mode, NegotiationMode::Lenient);
//!
//! let mut registry = settings.registry();
//! registry.register_provider(JsonProvider::new()).unwrap();
//! let negotiator = settings.negotiator(&registry);
//! assert_eq!(negotiator.mode(), NegotiationMode::Lenient);
//! ```
//!
//! ## Module Organization
//!
//! - [`settings`]: negotiation settings, sources and test helpers

pub mod settings;

pub use settings::{ConfigError, NegotiationSettings, SettingsBuilder};
