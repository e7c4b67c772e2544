//! Season names across cataloging languages.

use super::{token_index, token_pattern};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Canonical season names, spring first.
pub const SEASON_NAMES: [&str; 4] = ["Spring", "Summer", "Fall", "Winter"];

const SEASON_TABLE: &[(&str, u8)] = &[
    // English
    ("spring", 1), ("spr", 1), ("summer", 2), ("summ", 2), ("fall", 3), ("autumn", 3),
    ("aut", 3), ("winter", 4), ("wint", 4), ("wntr", 4),
    // French
    ("printemps", 1), ("été", 2), ("ete", 2), ("automne", 3), ("hiver", 4),
    // German
    ("frühling", 1), ("fruehling", 1), ("frühjahr", 1), ("fruehjahr", 1), ("sommer", 2),
    ("herbst", 3),
    // Spanish, Portuguese, Italian; never "estate"
    ("primavera", 1), ("verano", 2), ("verão", 2), ("verao", 2),
    ("otoño", 3), ("otono", 3), ("outono", 3), ("autunno", 3), ("invierno", 4),
    ("inverno", 4),
    // Dutch
    ("lente", 1), ("voorjaar", 1), ("zomer", 2), ("herfst", 3), ("najaar", 3),
    // Scandinavian
    ("vår", 1), ("sommar", 2), ("høst", 3), ("höst", 3), ("vinter", 4),
    // Polish, Czech
    ("wiosna", 1), ("jaro", 1), ("lato", 2), ("léto", 2), ("jesień", 3), ("jesien", 3),
    ("podzim", 3), ("zima", 4),
    // Russian, transliterated and Cyrillic
    ("vesna", 1), ("leto", 2), ("osen", 3), ("весна", 1), ("лето", 2), ("осень", 3),
    ("зима", 4),
];

lazy_static! {
    static ref SEASON_INDEX: HashMap<String, u8> = token_index(SEASON_TABLE);
    static ref SEASON_PATTERN: Regex = token_pattern(SEASON_TABLE);
}

/// Look up the season number (1 = spring … 4 = winter).
#[must_use]
pub fn season_number(token: &str) -> Option<u8> {
    let key = token.trim().trim_end_matches('.').to_lowercase();
    SEASON_INDEX.get(&key).copied()
}

/// Replace every season word with `Spring`, `Summer`, `Fall` or `Winter`.
///
/// # Examples
///
/// ```
/// use serial_holdings::normalize::normalize_seasons;
///
/// assert_eq!(normalize_seasons("automne 1975"), "Fall 1975");
/// assert_eq!(normalize_seasons("Herbst/Winter"), "Fall/Winter");
/// ```
#[must_use]
pub fn normalize_seasons(text: &str) -> String {
    SEASON_PATTERN
        .replace_all(text, |caps: &Captures| {
            match SEASON_INDEX.get(&caps[1].to_lowercase()) {
                Some(&s) => SEASON_NAMES[usize::from(s - 1)].to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multilingual_seasons() {
        assert_eq!(normalize_seasons("printemps"), "Spring");
        assert_eq!(normalize_seasons("été 1960"), "Summer 1960");
        assert_eq!(normalize_seasons("Autumn"), "Fall");
        assert_eq!(normalize_seasons("invierno/primavera"), "Winter/Spring");
        assert_eq!(normalize_seasons("осень"), "Fall");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_seasons("v.2 (1990:Winter)-v.3 (1991:Fall)");
        assert_eq!(normalize_seasons(&once), once);
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(normalize_seasons("Springfield Journal"), "Springfield Journal");
        assert_eq!(normalize_seasons("Wintergreen"), "Wintergreen");
        assert_eq!(normalize_seasons("Autumnal"), "Autumnal");
    }

    #[test]
    fn test_season_number() {
        assert_eq!(season_number("Spring"), Some(1));
        assert_eq!(season_number("verão"), Some(2));
        assert_eq!(season_number("herbst"), Some(3));
        assert_eq!(season_number("Dec"), None);
    }
}
