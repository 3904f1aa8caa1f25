//! Content types a handler is willing to produce

use std::collections::{HashMap, HashSet};

use super::content_type::ContentType;

/// The set of content types a request handler can answer with, grouped by
/// base media type.
///
/// Negotiation only considers registry entries that also appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducedContentTypes {
	by_media_type: HashMap<String, HashSet<ContentType>>,
}

impl ProducedContentTypes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a content type, returning `self` for chaining
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::{ContentType, ProducedContentTypes};
	///
	/// let produces = ProducedContentTypes::new()
	///     .with(ContentType::new("application/json"))
	///     .with(ContentType::new("application/json").with_version("2"));
	///
	/// assert!(produces.produces_media_type("application/json"));
	/// assert!(produces.allows(&ContentType::new("application/json").with_version("2")));
	/// assert!(!produces.allows(&ContentType::new("application/json").with_version("3")));
	/// ```
	pub fn with(mut self, content_type: ContentType) -> Self {
		self.insert(content_type);
		self
	}

	/// Adds a content type; returns whether it was newly inserted
	pub fn insert(&mut self, content_type: ContentType) -> bool {
		self.by_media_type
			.entry(content_type.media_type().to_string())
			.or_default()
			.insert(content_type)
	}

	pub fn produces_media_type(&self, media_type: &str) -> bool {
		self.by_media_type.contains_key(media_type)
	}

	/// The allowed variants for one base media type
	pub fn variants(&self, media_type: &str) -> Option<&HashSet<ContentType>> {
		self.by_media_type.get(media_type)
	}

	/// Whether this exact content type (vendor and version included) is allowed
	pub fn allows(&self, content_type: &ContentType) -> bool {
		self.variants(content_type.media_type())
			.is_some_and(|variants| variants.contains(content_type))
	}

	pub fn media_types(&self) -> impl Iterator<Item = &str> {
		self.by_media_type.keys().map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.by_media_type.is_empty()
	}
}

impl FromIterator<ContentType> for ProducedContentTypes {
	fn from_iter<I: IntoIterator<Item = ContentType>>(iter: I) -> Self {
		let mut produces = Self::new();
		for content_type in iter {
			produces.insert(content_type);
		}
		produces
	}
}

impl Extend<ContentType> for ProducedContentTypes {
	fn extend<I: IntoIterator<Item = ContentType>>(&mut self, iter: I) {
		for content_type in iter {
			self.insert(content_type);
		}
	}
}
