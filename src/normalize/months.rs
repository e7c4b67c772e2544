//! Month names and abbreviations across cataloging languages.

use super::{token_index, token_pattern};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Canonical month abbreviations, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Accented and transliterated spellings are separate keys on purpose; nothing
// is folded automatically.
const MONTH_TABLE: &[(&str, u8)] = &[
    // English
    ("january", 1), ("jan", 1), ("february", 2), ("feb", 2), ("march", 3), ("mar", 3),
    ("april", 4), ("apr", 4), ("may", 5), ("june", 6), ("jun", 6), ("july", 7), ("jul", 7),
    ("august", 8), ("aug", 8), ("september", 9), ("sept", 9), ("sep", 9), ("october", 10),
    ("oct", 10), ("november", 11), ("nov", 11), ("december", 12), ("dec", 12),
    // French
    ("janvier", 1), ("janv", 1), ("février", 2), ("fevrier", 2), ("févr", 2), ("fevr", 2),
    ("fév", 2), ("fev", 2), ("mars", 3), ("avril", 4), ("avr", 4), ("mai", 5), ("juin", 6),
    ("juillet", 7), ("juil", 7), ("août", 8), ("aout", 8), ("septembre", 9), ("octobre", 10),
    ("novembre", 11), ("décembre", 12), ("decembre", 12), ("déc", 12),
    // German
    ("januar", 1), ("jänner", 1), ("jaenner", 1), ("jän", 1), ("februar", 2), ("märz", 3),
    ("maerz", 3), ("mrz", 3), ("juni", 6), ("juli", 7), ("oktober", 10), ("okt", 10),
    ("dezember", 12), ("dez", 12),
    // Spanish
    ("enero", 1), ("ene", 1), ("febrero", 2), ("marzo", 3), ("abril", 4), ("abr", 4),
    ("mayo", 5), ("junio", 6), ("julio", 7), ("agosto", 8), ("septiembre", 9),
    ("setiembre", 9), ("octubre", 10), ("noviembre", 11), ("diciembre", 12), ("dic", 12),
    // Portuguese
    ("janeiro", 1), ("fevereiro", 2), ("março", 3), ("marco", 3), ("maio", 5), ("junho", 6),
    ("julho", 7), ("setembro", 9), ("outubro", 10), ("novembro", 11),
    ("dezembro", 12),
    // Italian
    ("gennaio", 1), ("genn", 1), ("gen", 1), ("febbraio", 2), ("febbr", 2), ("aprile", 4),
    ("maggio", 5), ("magg", 5), ("giugno", 6), ("giu", 6), ("luglio", 7), ("lug", 7),
    ("settembre", 9), ("sett", 9), ("ottobre", 10), ("ott", 10), ("dicembre", 12),
    // Dutch
    ("januari", 1), ("februari", 2), ("maart", 3), ("mei", 5), ("augustus", 8),
    // Scandinavian
    ("mars", 3), ("maj", 5), ("augusti", 8), ("oktober", 10), ("desember", 12),
    // Polish
    ("styczeń", 1), ("styczen", 1), ("luty", 2), ("marzec", 3), ("kwiecień", 4),
    ("kwiecien", 4), ("maj", 5), ("czerwiec", 6), ("lipiec", 7), ("sierpień", 8),
    ("sierpien", 8), ("wrzesień", 9), ("wrzesien", 9), ("październik", 10),
    ("pazdziernik", 10), ("listopad", 11), ("grudzień", 12), ("grudzien", 12),
    // Czech
    ("leden", 1), ("únor", 2), ("unor", 2), ("březen", 3), ("brezen", 3), ("duben", 4),
    ("květen", 5), ("kveten", 5), ("červen", 6), ("cerven", 6), ("červenec", 7),
    ("cervenec", 7), ("srpen", 8), ("září", 9), ("zari", 9), ("říjen", 10), ("rijen", 10),
    ("prosinec", 12),
    // Latin
    ("ianuarius", 1), ("februarius", 2), ("martius", 3), ("aprilis", 4), ("maius", 5),
    ("iunius", 6), ("iulius", 7), ("augustus", 8), ("october", 10),
    // Russian, transliterated
    ("janvar", 1), ("fevral", 2), ("mart", 3), ("aprel", 4), ("iiun", 6), ("iiul", 7),
    ("avgust", 8), ("sentiabr", 9), ("oktiabr", 10), ("noiabr", 11), ("dekabr", 12),
    // Russian, Cyrillic
    ("январь", 1), ("янв", 1), ("февраль", 2), ("фев", 2), ("март", 3), ("апрель", 4),
    ("апр", 4), ("май", 5), ("июнь", 6), ("июль", 7), ("август", 8), ("авг", 8),
    ("сентябрь", 9), ("сент", 9), ("октябрь", 10), ("окт", 10), ("ноябрь", 11),
    ("нояб", 11), ("декабрь", 12), ("дек", 12),
];

/// Tokens that are month abbreviations in one language and ordinary words in
/// another. They are only normalized next to a month or a four-digit year.
const AMBIGUOUS_MONTHS: &[(&str, u8)] = &[("set", 9), ("ago", 8), ("out", 10)];

lazy_static! {
    static ref MONTH_INDEX: HashMap<String, u8> = {
        let mut index = token_index(MONTH_TABLE);
        index.extend(token_index(AMBIGUOUS_MONTHS));
        index
    };
    static ref MONTH_PATTERN: Regex = token_pattern(MONTH_TABLE);
    static ref AMBIGUOUS_PATTERN: Regex = token_pattern(AMBIGUOUS_MONTHS);
    static ref LEFT_CONTEXT: Regex = Regex::new(
        r"(?:\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)|\b\d{4})[\s.,:/-]*$"
    )
    .expect("valid regex");
    static ref RIGHT_CONTEXT: Regex = Regex::new(
        r"^[\s.,:/-]*(?:(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\b|\d{4}\b)"
    )
    .expect("valid regex");
}

/// Look up the month number (1–12) for a name or abbreviation in any
/// supported language. A trailing period is ignored.
///
/// # Examples
///
/// ```
/// use serial_holdings::normalize::month_number;
///
/// assert_eq!(month_number("Février"), Some(2));
/// assert_eq!(month_number("Sept."), Some(9));
/// assert_eq!(month_number("Fall"), None);
/// ```
#[must_use]
pub fn month_number(token: &str) -> Option<u8> {
    let key = token.trim().trim_end_matches('.').to_lowercase();
    MONTH_INDEX.get(&key).copied()
}

/// Replace every month name or abbreviation with its three-letter English
/// abbreviation.
///
/// Matching is whole-word, so `"Marsh"` is untouched, and season words are
/// not months, so `"Fall"` is untouched.
///
/// # Examples
///
/// ```
/// use serial_holdings::normalize::normalize_months;
///
/// assert_eq!(normalize_months("v.3 (janvier 1990)"), "v.3 (Jan 1990)");
/// assert_eq!(normalize_months("The Fall of Rome"), "The Fall of Rome");
/// assert_eq!(normalize_months("set 1987"), "Sep 1987");
/// assert_eq!(normalize_months("a full set"), "a full set");
/// ```
#[must_use]
pub fn normalize_months(text: &str) -> String {
    let replaced = MONTH_PATTERN.replace_all(text, |caps: &Captures| canonical(&caps[1]));
    resolve_ambiguous(&replaced)
}

fn canonical(token: &str) -> String {
    match MONTH_INDEX.get(&token.to_lowercase()) {
        Some(&m) => MONTH_ABBREVIATIONS[usize::from(m - 1)].to_string(),
        None => token.to_string(),
    }
}

// One pass per ambiguous token is enough for chains like "ago-set 1987",
// where each token only gains context once its neighbour is resolved.
fn resolve_ambiguous(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..AMBIGUOUS_MONTHS.len() {
        let next = resolve_ambiguous_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn resolve_ambiguous_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in AMBIGUOUS_PATTERN.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always present");
        let before = &text[..whole.start()];
        let after = &text[whole.end()..];
        out.push_str(&text[last..whole.start()]);
        if LEFT_CONTEXT.is_match(before) || RIGHT_CONTEXT.is_match(after) {
            out.push_str(&canonical(&caps[1]));
        } else {
            out.push_str(whole.as_str());
        }
        last = whole.end();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multilingual_months() {
        assert_eq!(normalize_months("janvier"), "Jan");
        assert_eq!(normalize_months("März 1901"), "Mar 1901");
        assert_eq!(normalize_months("Maerz 1901"), "Mar 1901");
        assert_eq!(normalize_months("diciembre de 1950"), "Dec de 1950");
        assert_eq!(normalize_months("outubro"), "Oct");
        assert_eq!(normalize_months("październik"), "Oct");
        assert_eq!(normalize_months("sentiabr"), "Sep");
    }

    #[test]
    fn test_abbreviation_period_is_consumed() {
        assert_eq!(normalize_months("Sept. 1990"), "Sep 1990");
        assert_eq!(normalize_months("(1988:févr.)"), "(1988:Feb)");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_months("v.21:no.3 (1988:Mar)-v.25 (1992:Dec)");
        assert_eq!(once, "v.21:no.3 (1988:Mar)-v.25 (1992:Dec)");
        assert_eq!(normalize_months(&once), once);
    }

    #[test]
    fn test_no_partial_word_matches() {
        assert_eq!(normalize_months("Marsh Gazette"), "Marsh Gazette");
        assert_eq!(normalize_months("Decorative arts"), "Decorative arts");
        assert_eq!(normalize_months("Mayor's report"), "Mayor's report");
    }

    #[test]
    fn test_seasons_are_not_months() {
        assert_eq!(normalize_months("The Fall of Rome"), "The Fall of Rome");
        assert_eq!(normalize_months("Winter 1990"), "Winter 1990");
    }

    #[test]
    fn test_ambiguous_set_needs_context() {
        assert_eq!(normalize_months("set 1987"), "Sep 1987");
        assert_eq!(normalize_months("1987 set"), "1987 Sep");
        assert_eq!(normalize_months("ago-set 1987"), "Aug-Sep 1987");
        assert_eq!(normalize_months("complete set"), "complete set");
        assert_eq!(normalize_months("two years ago"), "two years ago");
        assert_eq!(normalize_months("out of print"), "out of print");
        assert_eq!(normalize_months("out 1999"), "Oct 1999");
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("jan"), Some(1));
        assert_eq!(month_number("Dezember"), Some(12));
        assert_eq!(month_number("set"), Some(9));
        assert_eq!(month_number("Spring"), None);
        assert_eq!(month_number(""), None);
    }
}
