//! Bookmark encoding between panel keys and URLs.
//!
//! A [`Bookmark`] projects the selected key into a shareable address: as a
//! fragment (`#pricing`, or `#!pricing` for hash-bang URLs), as a named query
//! parameter (`?tab=pricing`), or as the last path segment under a base path
//! (`/tour/pricing`). Decoding reverses the projection so revisiting a link
//! reproduces the same selection.

use url::form_urlencoded;
use url::Url;

use crate::error::{CoreError, CoreResult};

/// Marker some history adapters put in front of fragment keys.
const HASH_BANG: &str = "!";

/// Which part of the location carries the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkStyle {
    /// `#<prefix><key>`.
    Fragment { prefix: String },
    /// `?<param>=<key>`, other query parameters untouched.
    Query { param: String },
    /// `<base><key>`, where `base` starts and ends with `/`.
    Path { base: String },
}

impl BookmarkStyle {
    /// Returns the fragment style with no prefix.
    pub fn fragment() -> Self {
        Self::Fragment {
            prefix: String::new(),
        }
    }

    /// Returns the query style using `param`.
    pub fn query(param: impl Into<String>) -> Self {
        Self::Query {
            param: param.into(),
        }
    }

    /// Returns the path style under `base`, adding the leading and trailing
    /// `/` if missing.
    pub fn path(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.starts_with('/') {
            base.insert(0, '/');
        }
        if !base.ends_with('/') {
            base.push('/');
        }
        Self::Path { base }
    }
}

impl Default for BookmarkStyle {
    fn default() -> Self {
        Self::query("tab")
    }
}

/// A panel key in its URL-embeddable form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bookmark {
    key: String,
}

impl Bookmark {
    /// Creates a bookmark for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Returns the panel key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Consumes the bookmark, returning the panel key.
    pub fn into_key(self) -> String {
        self.key
    }

    /// Returns the URL part for this bookmark, e.g. `#pricing`,
    /// `?tab=pricing` or `/tour/pricing`.
    pub fn encode(&self, style: &BookmarkStyle) -> String {
        match style {
            BookmarkStyle::Fragment { prefix } => {
                format!("#{prefix}{}", urlencoding::encode(&self.key))
            }
            BookmarkStyle::Query { param } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(param, &self.key)
                    .finish();
                format!("?{query}")
            }
            BookmarkStyle::Path { base } => {
                format!("{base}{}", urlencoding::encode(&self.key))
            }
        }
    }

    /// Returns `base` with this bookmark embedded.
    ///
    /// In query form every other parameter of `base` is kept in order and
    /// only `param` is replaced (appended last).
    pub fn href(&self, base: &Url, style: &BookmarkStyle) -> Url {
        let mut url = base.clone();
        match style {
            BookmarkStyle::Fragment { prefix } => {
                let fragment = format!("{prefix}{}", urlencoding::encode(&self.key));
                url.set_fragment(Some(&fragment));
            }
            BookmarkStyle::Query { param } => {
                let others: Vec<(String, String)> = base
                    .query_pairs()
                    .filter(|(name, _)| name != param.as_str())
                    .map(|(name, value)| (name.into_owned(), value.into_owned()))
                    .collect();
                url.query_pairs_mut()
                    .clear()
                    .extend_pairs(others)
                    .append_pair(param, &self.key);
            }
            BookmarkStyle::Path { base } => {
                url.set_path(&format!("{base}{}", urlencoding::encode(&self.key)));
            }
        }
        url
    }

    /// Extracts a bookmark from `location`.
    ///
    /// Returns `None` when the location carries no key, an empty key, a
    /// fragment missing the configured prefix, a path outside the base, or a
    /// key that is not valid percent-encoded UTF-8. Whether the key
    /// names a real panel is the caller's concern.
    pub fn decode(location: &Url, style: &BookmarkStyle) -> Option<Self> {
        let key = match style {
            BookmarkStyle::Fragment { prefix } => {
                let raw = strip_marker(location.fragment()?, prefix)?;
                urlencoding::decode(raw).ok()?.into_owned()
            }
            BookmarkStyle::Path { base } => {
                let raw = location.path().strip_prefix(base.as_str())?;
                let raw = raw.strip_suffix('/').unwrap_or(raw);
                if raw.contains('/') {
                    return None;
                }
                urlencoding::decode(raw).ok()?.into_owned()
            }
            BookmarkStyle::Query { param } => location
                .query_pairs()
                .find(|(name, _)| name == param.as_str())
                .map(|(_, value)| value.into_owned())?,
        };
        if key.is_empty() {
            return None;
        }
        Some(Self { key })
    }

    /// Parses `location` and decodes it in one step.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidLocation`] if `location` is not an absolute URL.
    pub fn decode_str(location: &str, style: &BookmarkStyle) -> CoreResult<Option<Self>> {
        let url = parse_location(location)?;
        Ok(Self::decode(&url, style))
    }
}

/// Parses an absolute location string.
///
/// # Errors
///
/// [`CoreError::InvalidLocation`] on any parse failure.
pub fn parse_location(location: &str) -> CoreResult<Url> {
    Url::parse(location).map_err(|e| CoreError::InvalidLocation(format!("{location}: {e}")))
}

/// Removes the configured prefix, allowing a hash-bang marker in front of
/// it. Returns `None` when a non-empty prefix is missing.
fn strip_marker<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(raw.strip_prefix(HASH_BANG).unwrap_or(raw));
    }
    raw.strip_prefix(prefix).or_else(|| raw.strip_prefix(HASH_BANG)?.strip_prefix(prefix))
}
