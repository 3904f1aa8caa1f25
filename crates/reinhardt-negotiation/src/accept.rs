//! Accept header parsing

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Quality assumed when an entry carries no usable `q` parameter
pub const DEFAULT_QUALITY: f32 = 1.0;

/// One entry of an Accept header
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptPreference {
	/// Media type token exactly as written (e.g. "application/json")
	pub media_type: String,
	/// Parameters other than `q`, including `vendor` and `version`
	pub params: BTreeMap<String, String>,
	/// Quality factor (0.0 to 1.0)
	pub quality: f32,
}

impl AcceptPreference {
	/// Creates a preference with no parameters and quality 1.0
	pub fn new(media_type: impl Into<String>) -> Self {
		Self {
			media_type: media_type.into(),
			params: BTreeMap::new(),
			quality: DEFAULT_QUALITY,
		}
	}

	/// Parses a single entry (e.g. "application/json; version=2; q=0.8")
	///
	/// Returns `None` when the entry is blank.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::AcceptPreference;
	///
	/// let pref = AcceptPreference::parse("application/json; version=2; q=0.8").unwrap();
	/// assert_eq!(pref.media_type, "application/json");
	/// assert_eq!(pref.param("version"), Some("2"));
	/// assert_eq!(pref.quality, 0.8);
	///
	/// assert!(AcceptPreference::parse("   ").is_none());
	/// ```
	pub fn parse(entry: &str) -> Option<Self> {
		let mut parts = entry.split(';');
		let media_type = parts.next()?.trim();
		if media_type.is_empty() {
			return None;
		}

		let mut params = BTreeMap::new();
		let mut quality = DEFAULT_QUALITY;
		for param in parts {
			let param = param.trim();
			if param.is_empty() {
				continue;
			}
			let (key, value) = match param.split_once('=') {
				Some((key, value)) => (key.trim(), value.trim()),
				None => (param, ""),
			};
			if key == "q" {
				quality = parse_quality(value);
			} else {
				params.insert(key.to_string(), value.to_string());
			}
		}

		Some(Self {
			media_type: media_type.to_string(),
			params,
			quality,
		})
	}

	/// Returns a parameter value by name
	pub fn param(&self, key: &str) -> Option<&str> {
		self.params.get(key).map(String::as_str)
	}
}

/// Unparsable values fall back to [`DEFAULT_QUALITY`]; out of range values
/// are clamped.
fn parse_quality(value: &str) -> f32 {
	match value.parse::<f32>() {
		Ok(q) if q.is_nan() => DEFAULT_QUALITY,
		Ok(q) => q.clamp(0.0, 1.0),
		Err(_) => {
			tracing::trace!(value, "unparsable accept quality, using default");
			DEFAULT_QUALITY
		}
	}
}

impl fmt::Display for AcceptPreference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.media_type)?;
		for (key, value) in &self.params {
			if value.is_empty() {
				write!(f, "; {}", key)?;
			} else {
				write!(f, "; {}={}", key, value)?;
			}
		}
		if self.quality != DEFAULT_QUALITY {
			write!(f, "; q={}", self.quality)?;
		}
		Ok(())
	}
}

/// Represents an Accept header
///
/// Entries keep the order in which they appear in the raw header. Parsing
/// never re-sorts by quality; use [`AcceptHeader::sorted_by_quality`] for a
/// quality-ordered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptHeader {
	preferences: Vec<AcceptPreference>,
}

impl AcceptHeader {
	/// Parses an Accept header string into an AcceptHeader struct
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("text/html; q=0.9, application/json");
	/// assert_eq!(accept.len(), 2);
	/// // Header order is preserved
	/// assert_eq!(accept.preferences()[0].media_type, "text/html");
	/// assert_eq!(accept.preferences()[0].quality, 0.9);
	/// assert_eq!(accept.preferences()[1].quality, 1.0);
	///
	/// assert!(AcceptHeader::parse("").is_empty());
	/// ```
	pub fn parse(header: &str) -> Self {
		let preferences = header
			.split(',')
			.filter_map(AcceptPreference::parse)
			.collect();

		Self { preferences }
	}

	/// Creates an empty AcceptHeader with no media types
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::AcceptHeader;
	///
	/// let empty = AcceptHeader::empty();
	/// assert_eq!(empty.len(), 0);
	/// ```
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn preferences(&self) -> &[AcceptPreference] {
		&self.preferences
	}

	pub fn iter(&self) -> std::slice::Iter<'_, AcceptPreference> {
		self.preferences.iter()
	}

	pub fn len(&self) -> usize {
		self.preferences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.preferences.is_empty()
	}

	/// Returns the entries ordered by descending quality
	///
	/// The sort is stable, so entries with equal quality keep header order.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("a/x; q=0.5, b/y, c/z; q=0.5");
	/// let sorted: Vec<_> = accept
	///     .sorted_by_quality()
	///     .into_iter()
	///     .map(|p| p.media_type.as_str())
	///     .collect();
	/// assert_eq!(sorted, vec!["b/y", "a/x", "c/z"]);
	/// ```
	pub fn sorted_by_quality(&self) -> Vec<&AcceptPreference> {
		let mut sorted: Vec<&AcceptPreference> = self.preferences.iter().collect();
		sorted.sort_by(|a, b| b.quality.total_cmp(&a.quality));
		sorted
	}
}

impl FromStr for AcceptHeader {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse(s))
	}
}

impl<'a> IntoIterator for &'a AcceptHeader {
	type Item = &'a AcceptPreference;
	type IntoIter = std::slice::Iter<'a, AcceptPreference>;

	fn into_iter(self) -> Self::IntoIter {
		self.preferences.iter()
	}
}

impl IntoIterator for AcceptHeader {
	type Item = AcceptPreference;
	type IntoIter = std::vec::IntoIter<AcceptPreference>;

	fn into_iter(self) -> Self::IntoIter {
		self.preferences.into_iter()
	}
}

impl fmt::Display for AcceptHeader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, preference) in self.preferences.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}", preference)?;
		}
		Ok(())
	}
}
