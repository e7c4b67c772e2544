//! Field link keys carried in subfield `$8`.
//!
//! In holdings fields `$8` is a dotted sequence of numbers. The first number
//! is the link to a caption set; the rest order the data fields that use it:
//!
//! - `853 $8 1` defines caption set 1
//! - `863 $8 1.1`, `863 $8 1.2` are the first and second data fields for it
//!
//! Keys that are not dotted numbers are still used (the text before the
//! first dot becomes the link) but are reported as bad links.

use crate::warning::{FieldWarning, WarningKind};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref LINK_KEY: Regex = Regex::new(r"^\d+(?:\.\d+)*$").expect("valid regex");
}

/// Link number used when a field has no `$8`.
pub const SENTINEL_LINK: &str = "0";

/// A parsed `$8` value.
///
/// # Examples
///
/// ```
/// use serial_holdings::holdings::LinkKey;
///
/// let key = LinkKey::parse("1.3").unwrap();
/// assert_eq!(key.link(), "1");
/// assert_eq!(key.sequence(), Some("3"));
/// assert!(LinkKey::parse("1a").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkKey {
    raw: String,
    parts: Vec<String>,
}

impl LinkKey {
    /// Parse a well-formed dotted key.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if !LINK_KEY.is_match(trimmed) {
            return None;
        }
        Some(Self::split(trimmed))
    }

    /// Key for a field without `$8`.
    #[must_use]
    pub fn sentinel() -> Self {
        Self::split(SENTINEL_LINK)
    }

    /// Resolve the link key of a holdings field from its first `$8`.
    ///
    /// A missing `$8` yields the sentinel key and a [`WarningKind::MissingLink`];
    /// a malformed one is split anyway and reported as [`WarningKind::BadLink`].
    #[must_use]
    pub fn from_subfield(tag: &str, value: Option<&str>) -> (Self, Option<FieldWarning>) {
        match value {
            None => (
                Self::sentinel(),
                Some(FieldWarning::new(
                    WarningKind::MissingLink,
                    format!("field {tag} has no $8, link {SENTINEL_LINK} assumed"),
                )),
            ),
            Some(v) => match Self::parse(v) {
                Some(key) => (key, None),
                None => {
                    let trimmed = v.trim();
                    let key = if trimmed.is_empty() {
                        Self::sentinel()
                    } else {
                        Self::split(trimmed)
                    };
                    let warning = FieldWarning::new(
                        WarningKind::BadLink,
                        format!("field {tag}: $8 '{v}' is not a dotted number"),
                    );
                    (key, Some(warning))
                },
            },
        }
    }

    fn split(value: &str) -> Self {
        LinkKey {
            raw: value.to_string(),
            parts: value.split('.').map(|p| p.trim().to_string()).collect(),
        }
    }

    /// The caption set this key points to (text before the first dot).
    #[must_use]
    pub fn link(&self) -> &str {
        self.parts.first().map_or(SENTINEL_LINK, String::as_str)
    }

    /// The sequence number after the first dot, if any.
    #[must_use]
    pub fn sequence(&self) -> Option<&str> {
        self.parts.get(1).map(String::as_str)
    }

    /// The key as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let key = LinkKey::parse("12").unwrap();
        assert_eq!(key.link(), "12");
        assert_eq!(key.sequence(), None);

        let key = LinkKey::parse(" 2.10.1 ").unwrap();
        assert_eq!(key.link(), "2");
        assert_eq!(key.sequence(), Some("10"));
        assert_eq!(key.as_str(), "2.10.1");

        assert!(LinkKey::parse("").is_none());
        assert!(LinkKey::parse("1..2").is_none());
        assert!(LinkKey::parse(".1").is_none());
    }

    #[test]
    fn test_missing_link_uses_sentinel() {
        let (key, warning) = LinkKey::from_subfield("863", None);
        assert_eq!(key.link(), "0");
        assert_eq!(warning.unwrap().kind, WarningKind::MissingLink);
    }

    #[test]
    fn test_bad_link_still_resolves() {
        let (key, warning) = LinkKey::from_subfield("863", Some("1a.2"));
        assert_eq!(key.link(), "1a");
        assert_eq!(warning.unwrap().kind, WarningKind::BadLink);

        let (key, warning) = LinkKey::from_subfield("863", Some("1.1"));
        assert_eq!(key.link(), "1");
        assert!(warning.is_none());
    }
}
