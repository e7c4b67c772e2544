//! Non-fatal problems found while reading records and holdings.
//!
//! Nearly every anomaly in catalog data is survivable: the parser or converter
//! repairs what it can, records a [`FieldWarning`], and keeps going. Callers
//! decide which [`WarningKind`] categories disqualify a record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a non-fatal problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A line that does not start with `=`
    UnrecognizedLine,
    /// A field tag that is not three alphanumeric characters
    IllegalTag,
    /// A leader shorter than 24 characters (padded with blanks)
    ShortLeader,
    /// Leader or `001` appearing more than once
    DuplicateField,
    /// Data field with fewer than two indicator characters
    MissingIndicators,
    /// Data field text that does not begin with a `$` delimiter
    MissingSubfieldDelimiter,
    /// A `$` with no subfield code after it
    DanglingSubfield,
    /// A subfield code with no content
    BlankSubfield,
    /// A subfield code not defined for the field
    IllegalSubfield,
    /// A non-repeatable subfield code appearing twice
    DuplicateSubfield,
    /// An indicator value outside the legal set for its field and position
    IllegalIndicator,
    /// 85x/86x field without `$8`
    MissingLink,
    /// `$8` value not of the form `n` or `n.n`
    BadLink,
    /// 86x subfield with no caption in the linked 85x
    UncaptionedSubfield,
    /// 86x link id with no 85x caption set at all
    UnknownCaptionLink,
    /// More than one `-` in an enumeration or chronology value
    DashOverflow,
    /// Month or season code that cannot be converted
    BadChronology,
}

impl WarningKind {
    /// Stable snake_case name used by configuration and reports.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::UnrecognizedLine => "unrecognized_line",
            Self::IllegalTag => "illegal_tag",
            Self::ShortLeader => "short_leader",
            Self::DuplicateField => "duplicate_field",
            Self::MissingIndicators => "missing_indicators",
            Self::MissingSubfieldDelimiter => "missing_subfield_delimiter",
            Self::DanglingSubfield => "dangling_subfield",
            Self::BlankSubfield => "blank_subfield",
            Self::IllegalSubfield => "illegal_subfield",
            Self::DuplicateSubfield => "duplicate_subfield",
            Self::IllegalIndicator => "illegal_indicator",
            Self::MissingLink => "missing_link",
            Self::BadLink => "bad_link",
            Self::UncaptionedSubfield => "uncaptioned_subfield",
            Self::UnknownCaptionLink => "unknown_caption_link",
            Self::DashOverflow => "dash_overflow",
            Self::BadChronology => "bad_chronology",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

/// A non-fatal problem with the text it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWarning {
    /// Problem category
    pub kind: WarningKind,
    /// Human-readable detail
    pub detail: String,
    /// Source line, when the problem is tied to one
    pub line: Option<String>,
}

impl FieldWarning {
    /// Create a warning not tied to a source line.
    pub fn new(kind: WarningKind, detail: impl Into<String>) -> Self {
        FieldWarning {
            kind,
            detail: detail.into(),
            line: None,
        }
    }

    /// Attach the offending source line.
    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.line {
            Some(line) => write!(f, "{}: {} [{}]", self.kind, self.detail, line),
            None => write!(f, "{}: {}", self.kind, self.detail),
        }
    }
}
