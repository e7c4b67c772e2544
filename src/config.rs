//! Configuration for record parsing, holdings conversion and year checks.
//!
//! [`HoldingsConfig`] is a plain value: build it in code with the `with_*`
//! methods or load it from JSON with [`HoldingsConfig::from_json_str`].
//!
//! # Examples
//!
//! ```
//! use serial_holdings::config::{HoldingsConfig, RecordSource};
//!
//! let config = HoldingsConfig::new()
//!     .with_loose_rules(true)
//!     .with_record_source(RecordSource::WorldCat);
//! assert!(config.loose_rules);
//! ```

use crate::error::{MarcError, Result};
use crate::warning::{FieldWarning, WarningKind};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a record came from; drives OCLC number resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Fetched from WorldCat; the `001` is an OCLC number by definition
    WorldCat,
    /// Exported from a local catalog
    #[default]
    Local,
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorldCat => write!(f, "WorldCat"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// A site-specific field that carries the OCLC number in local exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalField {
    /// Field tag, e.g. `"907"`
    pub tag: String,
    /// Subfield code
    pub code: char,
}

/// Configuration shared by the record model, converter and year engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldingsConfig {
    /// Accept season codes in month slots and month codes in season slots.
    pub loose_rules: bool,

    /// Provenance of the records being read.
    pub record_source: RecordSource,

    /// Local field checked first for the OCLC number on non-WorldCat records.
    pub local_oclc_field: Option<LocalField>,

    /// Fixed "current year" for range checks. `None` uses the system clock.
    pub current_year: Option<i32>,

    /// Warning categories that make a record fail validation.
    pub disqualifying: Vec<WarningKind>,
}

/// This calendar year, from the local clock.
pub(crate) fn system_year() -> i32 {
    chrono::Local::now().year()
}

impl Default for HoldingsConfig {
    fn default() -> Self {
        Self {
            loose_rules: false,
            record_source: RecordSource::default(),
            local_oclc_field: None,
            current_year: None,
            disqualifying: Vec::new(),
        }
    }
}

impl HoldingsConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::InvalidConfig`] if the JSON is malformed or the
    /// configured current year is before 1600.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if let Some(year) = config.current_year {
            if year < 1600 {
                return Err(MarcError::InvalidConfig(format!(
                    "current_year {year} is before 1600"
                )));
            }
        }
        if let Some(local) = &config.local_oclc_field {
            if local.tag.len() != 3 {
                return Err(MarcError::InvalidConfig(format!(
                    "local_oclc_field tag must be 3 characters, got '{}'",
                    local.tag
                )));
            }
        }
        Ok(config)
    }

    /// Sets loose month/season tolerance.
    #[must_use]
    pub const fn with_loose_rules(mut self, enabled: bool) -> Self {
        self.loose_rules = enabled;
        self
    }

    /// Sets record provenance.
    #[must_use]
    pub const fn with_record_source(mut self, source: RecordSource) -> Self {
        self.record_source = source;
        self
    }

    /// Sets the local OCLC field.
    #[must_use]
    pub fn with_local_oclc_field(mut self, tag: impl Into<String>, code: char) -> Self {
        self.local_oclc_field = Some(LocalField {
            tag: tag.into(),
            code,
        });
        self
    }

    /// Pins the current year.
    #[must_use]
    pub const fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    /// Marks a warning category as disqualifying.
    #[must_use]
    pub fn with_disqualifying(mut self, kind: WarningKind) -> Self {
        if !self.disqualifying.contains(&kind) {
            self.disqualifying.push(kind);
        }
        self
    }

    /// The configured year, or this calendar year.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.current_year.unwrap_or_else(system_year)
    }

    /// Whether any of `warnings` falls in a disqualifying category.
    #[must_use]
    pub fn is_disqualified(&self, warnings: &[FieldWarning]) -> bool {
        warnings
            .iter()
            .any(|w| self.disqualifying.contains(&w.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HoldingsConfig::default();
        assert!(!config.loose_rules);
        assert_eq!(config.record_source, RecordSource::Local);
        assert!(config.local_oclc_field.is_none());
        assert!(config.current_year.is_none());
        assert!(config.disqualifying.is_empty());
    }

    #[test]
    fn test_builder_pattern() {
        let config = HoldingsConfig::new()
            .with_loose_rules(true)
            .with_record_source(RecordSource::WorldCat)
            .with_local_oclc_field("907", 'a')
            .with_current_year(2020)
            .with_disqualifying(WarningKind::MissingLink)
            .with_disqualifying(WarningKind::MissingLink);

        assert!(config.loose_rules);
        assert_eq!(config.record_source, RecordSource::WorldCat);
        assert_eq!(config.local_oclc_field.as_ref().unwrap().tag, "907");
        assert_eq!(config.current_year(), 2020);
        assert_eq!(config.disqualifying, vec![WarningKind::MissingLink]);
    }

    #[test]
    fn test_from_json_partial() {
        let config = HoldingsConfig::from_json_str(
            r#"{"loose_rules": true, "record_source": "world_cat",
                "disqualifying": ["dash_overflow"]}"#,
        )
        .unwrap();
        assert!(config.loose_rules);
        assert_eq!(config.record_source, RecordSource::WorldCat);
        assert_eq!(config.disqualifying, vec![WarningKind::DashOverflow]);
        assert!(config.current_year.is_none());
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(HoldingsConfig::from_json_str(r#"{"current_year": 1200}"#).is_err());
        assert!(HoldingsConfig::from_json_str(
            r#"{"local_oclc_field": {"tag": "9", "code": "a"}}"#
        )
        .is_err());
        assert!(HoldingsConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_is_disqualified() {
        let config = HoldingsConfig::new().with_disqualifying(WarningKind::BadLink);
        let ok = vec![FieldWarning::new(WarningKind::BlankSubfield, "x")];
        let bad = vec![FieldWarning::new(WarningKind::BadLink, "x")];
        assert!(!config.is_disqualified(&ok));
        assert!(config.is_disqualified(&bad));
    }
}
