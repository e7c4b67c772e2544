//! MARC holdings captions and patterns (853-855) linked to enumeration and
//! chronology data (863-865).
//!
//! A caption field defines what each subfield means for one link number:
//!
//! ```text
//! =853  20$81$av.$bno.$i(year)$j(month)
//! =863  40$81.1$a21-25$b3-$i1988-1992$j03-
//! ```
//!
//! The data field's `$8 1.1` points back at caption set `1`, so the values
//! above render as `v.21:no.3 (1988:Mar)-v.25 (1992)`.
//!
//! - [`linkage`] parses `$8` link keys
//! - [`captions`] holds the caption table built from 85x fields
//! - [`indicators`] knows the legal indicator values for 85x/86x
//! - [`converter`] walks a record and produces [`HoldingsStatement`]s
//!
//! Structural problems never stop a conversion. They come back as
//! [`crate::FieldWarning`]s beside the statements.

pub mod captions;
pub mod converter;
pub mod indicators;
pub mod linkage;

pub use captions::{CaptionGroup, CaptionTable};
pub use converter::{ConversionResult, HoldingsConverter, HoldingsStatement};
pub use indicators::{IndicatorRules, IndicatorValidation};
pub use linkage::LinkKey;

/// English ordinal for a numeric value: `1` → `1st`, `12` → `12th`, `22` → `22nd`.
///
/// Non-numeric input is returned unchanged.
///
/// # Examples
///
/// ```
/// use serial_holdings::holdings::ordinal;
///
/// assert_eq!(ordinal("1"), "1st");
/// assert_eq!(ordinal("13"), "13th");
/// assert_eq!(ordinal("102"), "102nd");
/// assert_eq!(ordinal("n.s."), "n.s.");
/// ```
#[must_use]
pub fn ordinal(value: &str) -> String {
    let digits = value.trim();
    let Ok(n) = digits.parse::<u64>() else {
        return value.to_string();
    };
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{digits}{suffix}")
}

/// Prefix a holdings string with `suppl ` or `index ` according to the tag
/// it came from (864/867 and 865/868). Text that already says `suppl` is left
/// alone.
pub(crate) fn display_prefix(tag: &str, text: &str) -> String {
    match tag {
        "864" | "867" if !text.to_lowercase().contains("suppl") => format!("suppl {text}"),
        "865" | "868" => format!("index {text}"),
        _ => text.to_string(),
    }
}
