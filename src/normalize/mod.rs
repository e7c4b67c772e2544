//! Lexical normalizers for holdings and date text.
//!
//! Catalogers write months, seasons and enumeration words in whatever language
//! the piece was published in. These functions fold them to the short English
//! forms the rest of the crate expects:
//!
//! - [`normalize_months`] — `"janvier"`, `"Sept."`, `"März"` → `Jan`, `Sep`, `Mar`
//! - [`normalize_seasons`] — `"automne"`, `"Herbst"` → `Fall`
//! - [`normalize_enumeration`] — `"Band 5"`, `"Heft 3"` → `v.5`, `no.3`
//!
//! All three are pure and idempotent, match on word boundaries only, and never
//! report warnings.

pub mod enumeration;
pub mod months;
pub mod seasons;

pub use enumeration::normalize_enumeration;
pub use months::{month_number, normalize_months, MONTH_ABBREVIATIONS};
pub use seasons::{normalize_seasons, season_number, SEASON_NAMES};

use regex::Regex;
use std::collections::HashMap;

/// Build a case-insensitive, word-bounded alternation over the table keys.
///
/// Longer keys come first so `"sept"` wins over `"sep"`. A trailing period
/// after an abbreviation is consumed with the word.
pub(crate) fn token_pattern(table: &[(&str, u8)]) -> Regex {
    let mut keys: Vec<&str> = table.iter().map(|(k, _)| *k).collect();
    keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    keys.dedup();
    let alternation = keys
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b\.?")).expect("token table builds a valid regex")
}

/// Lower-cased key → canonical index.
pub(crate) fn token_index(table: &[(&str, u8)]) -> HashMap<String, u8> {
    table
        .iter()
        .map(|(k, v)| (k.to_lowercase(), *v))
        .collect()
}
