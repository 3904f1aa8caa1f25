//! Provider selection from an Accept header
//!
//! The negotiator walks the Accept entries in header order (quality values do
//! not reorder them) and returns the first provider that is both produced by
//! the handler and registered exactly once for the requested content type.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::accept::{AcceptHeader, AcceptPreference};
use super::content_type::ContentType;
use super::error::{NoProviderFound, NoProviderReason};
use super::produces::ProducedContentTypes;
use super::provider::Provider;
use super::registry::ProviderRegistry;

/// What the negotiator does with an Accept entry the handler does not produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationMode {
	/// Abort the whole negotiation on the first unsupported entry
	#[default]
	Strict,
	/// Skip the entry and try the next one
	Lenient,
}

/// Result of a successful negotiation
#[derive(Debug, Clone)]
pub struct Negotiated {
	pub content_type: ContentType,
	pub provider: Arc<dyn Provider>,
}

/// Outcome of evaluating a single Accept entry
enum Step {
	Selected(Negotiated),
	Continue,
	Abort(NoProviderFound),
}

/// Selects a provider for a request
///
/// Borrows the application's [`ProviderRegistry`]; the negotiator itself is
/// cheap to construct per request or to keep alongside the registry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_negotiation::{
///     ContentNegotiator, ContentType, JsonProvider, ProducedContentTypes, ProviderRegistry,
/// };
///
/// let mut registry = ProviderRegistry::new();
/// registry.register_provider(JsonProvider::new()).unwrap();
///
/// let produces = ProducedContentTypes::new().with(ContentType::new("application/json"));
/// let negotiator = ContentNegotiator::new(&registry);
///
/// let provider = negotiator.select("application/json", &produces).unwrap();
/// assert_eq!(provider.content_type(), ContentType::new("application/json"));
///
/// assert!(negotiator.select("application/xml", &produces).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContentNegotiator<'r> {
	registry: &'r ProviderRegistry,
	mode: NegotiationMode,
}

impl<'r> ContentNegotiator<'r> {
	pub fn new(registry: &'r ProviderRegistry) -> Self {
		Self {
			registry,
			mode: NegotiationMode::default(),
		}
	}

	pub fn with_mode(mut self, mode: NegotiationMode) -> Self {
		self.mode = mode;
		self
	}

	pub fn mode(&self) -> NegotiationMode {
		self.mode
	}

	pub fn registry(&self) -> &'r ProviderRegistry {
		self.registry
	}

	/// Selects the provider for a raw Accept header value
	///
	/// # Errors
	///
	/// Returns [`NoProviderFound`] when the header is empty, when (in strict
	/// mode) an entry names a media type or variant the handler does not
	/// produce, or when no entry resolves to exactly one registered provider.
	pub fn select(
		&self,
		accept: &str,
		produces: &ProducedContentTypes,
	) -> Result<Arc<dyn Provider>, NoProviderFound> {
		self.negotiate(accept, produces).map(|n| n.provider)
	}

	/// Like [`ContentNegotiator::select`], also returning the matched content type
	pub fn negotiate(
		&self,
		accept: &str,
		produces: &ProducedContentTypes,
	) -> Result<Negotiated, NoProviderFound> {
		if accept.is_empty() {
			tracing::debug!("negotiation failed: empty accept header");
			return Err(NoProviderFound::new(NoProviderReason::EmptyHeader));
		}

		let header = AcceptHeader::parse(accept);
		self.negotiate_header(&header, produces)
	}

	/// Runs negotiation over an already parsed header
	///
	/// An empty `header` exhausts immediately with
	/// [`NoProviderReason::NoUniqueMatch`]; the empty-string check belongs to
	/// [`ContentNegotiator::negotiate`].
	pub fn negotiate_header(
		&self,
		header: &AcceptHeader,
		produces: &ProducedContentTypes,
	) -> Result<Negotiated, NoProviderFound> {
		for preference in header {
			match self.evaluate(preference, produces) {
				Step::Selected(negotiated) => {
					tracing::debug!(
						content_type = %negotiated.content_type,
						"negotiated provider"
					);
					return Ok(negotiated);
				}
				Step::Continue => continue,
				Step::Abort(err) => {
					tracing::debug!(error = %err, "negotiation aborted");
					return Err(err);
				}
			}
		}

		tracing::debug!(accept = %header, "negotiation exhausted accept entries");
		Err(NoProviderFound::new(NoProviderReason::NoUniqueMatch))
	}

	fn evaluate(&self, preference: &AcceptPreference, produces: &ProducedContentTypes) -> Step {
		let media_type = preference.media_type.as_str();

		let Some(variants) = produces.variants(media_type) else {
			return self.reject(NoProviderReason::UnsupportedMediaType, media_type);
		};

		let candidate = ContentType::from_preference(preference);
		if !variants.contains(&candidate) {
			return self.reject(NoProviderReason::DisallowedVariant, media_type);
		}

		let mut matches = self
			.registry
			.lookup(media_type)
			.iter()
			.filter(|registration| registration.content_type == candidate);

		match (matches.next(), matches.next()) {
			(Some(registration), None) => Step::Selected(Negotiated {
				content_type: candidate,
				provider: Arc::clone(&registration.provider),
			}),
			(None, _) => {
				tracing::trace!(content_type = %candidate, "no registered provider, trying next entry");
				Step::Continue
			}
			(Some(_), Some(_)) => {
				tracing::trace!(content_type = %candidate, "ambiguous registration, trying next entry");
				Step::Continue
			}
		}
	}

	fn reject(&self, reason: NoProviderReason, media_type: &str) -> Step {
		match self.mode {
			NegotiationMode::Strict => Step::Abort(NoProviderFound::for_media_type(reason, media_type)),
			NegotiationMode::Lenient => {
				tracing::trace!(media_type, %reason, "skipping accept entry");
				Step::Continue
			}
		}
	}
}
