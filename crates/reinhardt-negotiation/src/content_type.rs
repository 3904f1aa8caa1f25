//! Versioned and vendored content type model

use std::fmt;
use std::str::FromStr;

use super::accept::{AcceptHeader, AcceptPreference};
use super::error::ContentTypeParseError;

/// Parameter name carrying the vendor qualifier
pub const VENDOR_PARAM: &str = "vendor";
/// Parameter name carrying the version qualifier
pub const VERSION_PARAM: &str = "version";

/// A media type qualified by an optional vendor and version.
///
/// Two content types are equal only when the media type, vendor and version
/// all match. An absent vendor or version matches absence only, it is never
/// treated as a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentType {
	media_type: String,
	vendor: Option<String>,
	version: Option<String>,
}

impl ContentType {
	/// Creates an unqualified content type
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::ContentType;
	///
	/// let json = ContentType::new("application/json");
	/// assert_eq!(json.media_type(), "application/json");
	/// assert_eq!(json.vendor(), None);
	/// assert_eq!(json.version(), None);
	/// ```
	pub fn new(media_type: impl Into<String>) -> Self {
		Self {
			media_type: media_type.into(),
			vendor: None,
			version: None,
		}
	}

	/// Creates a content type from all three parts at once
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::ContentType;
	///
	/// let ct = ContentType::versioned("application/json", Some("acme"), Some("2"));
	/// assert_eq!(ct.vendor(), Some("acme"));
	/// assert_eq!(ct.version(), Some("2"));
	/// ```
	pub fn versioned(
		media_type: impl Into<String>,
		vendor: Option<impl Into<String>>,
		version: Option<impl Into<String>>,
	) -> Self {
		Self {
			media_type: media_type.into(),
			vendor: vendor.map(Into::into),
			version: version.map(Into::into),
		}
	}

	/// Returns a copy qualified with the given vendor
	pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
		self.vendor = Some(vendor.into());
		self
	}

	/// Returns a copy qualified with the given version
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::ContentType;
	///
	/// let v2 = ContentType::new("application/json").with_version("2");
	/// assert_ne!(v2, ContentType::new("application/json"));
	/// ```
	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = Some(version.into());
		self
	}

	/// Lifts the `vendor` and `version` parameters of an Accept entry into a
	/// content type. Every other parameter is ignored.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::{AcceptHeader, ContentType};
	///
	/// let accept = AcceptHeader::parse("application/json; version=2; charset=utf-8");
	/// let ct = ContentType::from_preference(&accept.preferences()[0]);
	/// assert_eq!(ct, ContentType::new("application/json").with_version("2"));
	/// ```
	pub fn from_preference(preference: &AcceptPreference) -> Self {
		Self {
			media_type: preference.media_type.clone(),
			vendor: preference.param(VENDOR_PARAM).map(str::to_string),
			version: preference.param(VERSION_PARAM).map(str::to_string),
		}
	}

	pub fn media_type(&self) -> &str {
		&self.media_type
	}

	pub fn vendor(&self) -> Option<&str> {
		self.vendor.as_deref()
	}

	pub fn version(&self) -> Option<&str> {
		self.version.as_deref()
	}

	/// Whether either qualifier is present
	pub fn is_qualified(&self) -> bool {
		self.vendor.is_some() || self.version.is_some()
	}
}

impl fmt::Display for ContentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.media_type)?;
		if let Some(vendor) = &self.vendor {
			write!(f, "; {}={}", VENDOR_PARAM, vendor)?;
		}
		if let Some(version) = &self.version {
			write!(f, "; {}={}", VERSION_PARAM, version)?;
		}
		Ok(())
	}
}

impl FromStr for ContentType {
	type Err = ContentTypeParseError;

	/// Parses the header form produced by `Display`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let header = AcceptHeader::parse(s);
		match header.preferences() {
			[] => Err(ContentTypeParseError::Empty),
			[single] => Ok(Self::from_preference(single)),
			_ => Err(ContentTypeParseError::MultipleEntries(s.to_string())),
		}
	}
}

impl From<&AcceptPreference> for ContentType {
	fn from(preference: &AcceptPreference) -> Self {
		Self::from_preference(preference)
	}
}
