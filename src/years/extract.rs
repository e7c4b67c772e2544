//! Year extraction from holdings and date text.
//!
//! The pipeline, in order:
//!
//! 1. fold month, season and enumeration words to canonical forms, and widen
//!    a two-digit year after a month: `Dec 1990-Jan 91` → `Dec 1990-Jan 1991`
//! 2. blank out numbers that are not years (see [`super::cleanup`])
//! 3. pull out `lacks` / `without` / `w/o` clauses and count the years they name
//! 4. widen two-digit shorthand: `1823-46` → `1823-1846`
//! 5. expand slash-year ranges: `1966/1967-1969/1970`
//! 6. expand dash ranges: `1971-1975`
//! 7. expand open ranges (`2004-`) up to last year, unless the dash is
//!    followed by a blanked-out volume number
//! 8. pick up the remaining lone years
//!
//! Steps 5 through 8 feed an adder that drops years outside 1600 through the
//! current year, and lets each excluded year cancel one inclusion. The sorted
//! result then loses any leading run that sits more than a century before the
//! rest, which is usually a page count or call number.

use super::cleanup::{clean_holdings_text, rewrite_to_fixed_point, MONTHS};
use super::range::{check_year_between_at, concatenate_years, is_valid_year, ONGOING_YEAR};
use crate::config::{system_year, HoldingsConfig};
use crate::normalize::{normalize_enumeration, normalize_months, normalize_seasons};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::ops::Range;

/// Years further apart than this break the accepted run.
const IMPLAUSIBLE_GAP: i32 = 100;

const YEAR: &str = r"(1[6-9]\d\d|20\d\d)";
const CLOSE_YEAR: &str = r"(1[6-9]\d\d|20\d\d|9999)";
/// Text allowed between a year and a range dash, e.g. `:Mar)` or ` (`.
const GAP: &str = r"[^\d\-;,]{0,12}";
const EXCLUSION_WORDS: &str = r"(?:lacks|lacking|wanting|missing|without|w/o)";

lazy_static! {
    static ref EXCLUSION_PARENTHESIZED: Regex = Regex::new(&format!(
        r"(?i)\(\s*{EXCLUSION_WORDS}\b[:.]?([^()]*(?:\([^()]*\)[^()]*)*)\)"
    ))
    .expect("valid regex");
    static ref EXCLUSION_BARE: Regex =
        Regex::new(&format!(r"(?i)\b{EXCLUSION_WORDS}\b[:.]?([^;]*)")).expect("valid regex");
    static ref MONTH_SHORTHAND: Regex = Regex::new(&format!(
        r"\b(1[6-9]\d\d|20\d\d)(\s*-\s*(?:{MONTHS})\.?\s+)(\d{{2}})(\s*[^\s\d]|\s*$)"
    ))
    .expect("valid regex");
    static ref SHORTHAND: Regex =
        Regex::new(r"\b(1[6-9]\d\d|20\d\d)(\s*[-/]\s*)(\d{2})\b").expect("valid regex");
    static ref SLASH_OPEN_RANGE: Regex = Regex::new(&format!(
        r"{YEAR}/{YEAR}{GAP}-{GAP}{CLOSE_YEAR}(?:/{CLOSE_YEAR})?"
    ))
    .expect("valid regex");
    static ref SLASH_CLOSE_RANGE: Regex =
        Regex::new(&format!(r"{YEAR}{GAP}-{GAP}{YEAR}/{CLOSE_YEAR}")).expect("valid regex");
    static ref DASH_RANGE: Regex =
        Regex::new(&format!(r"{YEAR}{GAP}-{GAP}{CLOSE_YEAR}")).expect("valid regex");
    static ref OPEN_RANGE: Regex =
        Regex::new(&format!(r"{YEAR}{GAP}-[^\d;,#]*(?:[;,]|$)")).expect("valid regex");
    static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").expect("valid regex");
    static ref YEAR_TOKEN: Regex = Regex::new(r"^(?:1[6-9]\d\d|20\d\d)$").expect("valid regex");
}

/// A year found standing alone in text, with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearToken {
    /// The year
    pub year: i32,
    /// Byte range of the four digits
    pub span: Range<usize>,
}

/// Four-digit years (1600-2099) that are not part of a longer number.
///
/// # Examples
///
/// ```
/// use serial_holdings::years::year_tokens;
///
/// let tokens = year_tokens("1990, no. 12345, 2001");
/// let years: Vec<i32> = tokens.iter().map(|t| t.year).collect();
/// assert_eq!(years, [1990, 2001]);
/// assert_eq!(tokens[0].span, 0..4);
/// ```
#[must_use]
pub fn year_tokens(text: &str) -> Vec<YearToken> {
    DIGIT_RUN
        .find_iter(text)
        .filter(|m| YEAR_TOKEN.is_match(m.as_str()))
        .filter_map(|m| {
            Some(YearToken {
                year: m.as_str().parse().ok()?,
                span: m.range(),
            })
        })
        .collect()
}

/// Result of one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionOutcome {
    /// Accepted years, sorted and unique
    pub years: Vec<i32>,
    /// Inclusions cancelled by an exclusion clause, in scan order
    pub excluded: Vec<i32>,
    /// Set when a rewrite pass stopped at its repetition cap
    pub truncated: bool,
}

/// Year extraction with a fixed notion of "this year".
///
/// # Examples
///
/// ```
/// use serial_holdings::YearExtractor;
///
/// let extractor = YearExtractor::with_current_year(2024);
/// assert_eq!(extractor.all_years("1971-1975"), [1971, 1972, 1973, 1974, 1975]);
/// assert_eq!(extractor.first_last("v.1-10 (1990-1999)"), Some((1990, 1999)));
/// assert_eq!(
///     extractor.concatenated_year_range("1990, 1991, 1992 and 1995"),
///     "1990-1992, 1995"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearExtractor {
    current_year: i32,
}

impl Default for YearExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl YearExtractor {
    /// Extractor using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_current_year(system_year())
    }

    /// Extractor that treats `year` as the current year.
    #[must_use]
    pub const fn with_current_year(year: i32) -> Self {
        YearExtractor { current_year: year }
    }

    /// Extractor using the configured year override, if any.
    #[must_use]
    pub fn from_config(config: &HoldingsConfig) -> Self {
        Self::with_current_year(config.current_year())
    }

    /// The year this extractor treats as current.
    #[must_use]
    pub const fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Run the full pipeline.
    #[must_use]
    pub fn extract(&self, text: &str) -> ExtractionOutcome {
        let normalized = normalize_seasons(&normalize_months(&normalize_enumeration(text)));
        let (normalized, month_truncated) = rewrite_to_fixed_point(
            "month year shorthand",
            &MONTH_SHORTHAND,
            normalized,
            widen_month_shorthand,
        );
        let (cleaned, mut truncated) = clean_holdings_text(&normalized);
        truncated |= month_truncated;

        let mut exclusions: HashMap<i32, u32> = HashMap::new();
        let mut working = format!(" {cleaned} ");
        for pattern in [&*EXCLUSION_PARENTHESIZED, &*EXCLUSION_BARE] {
            let mut clause_truncated = false;
            let (rest, hit_cap) =
                rewrite_to_fixed_point("exclusion clause", pattern, working, |caps| {
                    let clause = caps.get(1).map_or("", |m| m.as_str());
                    self.scan(clause, &mut clause_truncated, &mut |year| {
                        if is_valid_year(year, self.current_year) {
                            *exclusions.entry(year).or_insert(0) += 1;
                        }
                    });
                    " ".to_string()
                });
            working = rest;
            truncated |= hit_cap || clause_truncated;
        }

        let mut accepted: Vec<i32> = Vec::new();
        let mut excluded: Vec<i32> = Vec::new();
        self.scan(&working, &mut truncated, &mut |year| {
            if !is_valid_year(year, self.current_year) {
                return;
            }
            match exclusions.get_mut(&year) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    excluded.push(year);
                },
                _ => accepted.push(year),
            }
        });

        accepted.sort_unstable();
        accepted.dedup();
        let years = drop_implausible(accepted);

        tracing::debug!(
            years = years.len(),
            excluded = excluded.len(),
            truncated,
            "extracted years"
        );
        ExtractionOutcome {
            years,
            excluded,
            truncated,
        }
    }

    /// Every accepted year, sorted and unique.
    #[must_use]
    pub fn all_years(&self, text: &str) -> Vec<i32> {
        self.extract(text).years
    }

    /// First and last accepted year. A single year is returned twice.
    #[must_use]
    pub fn first_last(&self, text: &str) -> Option<(i32, i32)> {
        let years = self.all_years(text);
        Some((*years.first()?, *years.last()?))
    }

    /// Accepted years in compact run notation, e.g. `1990-1992, 1995`.
    #[must_use]
    pub fn concatenated_year_range(&self, text: &str) -> String {
        concatenate_years(&self.all_years(text))
    }

    /// [`super::check_year_between`] against this extractor's current year.
    #[must_use]
    pub fn check_year_between(&self, start: &str, end: &str, candidate: &str) -> Option<bool> {
        check_year_between_at(start, end, candidate, self.current_year)
    }

    /// Steps 4 through 8 over one piece of text, handing each year to `add`.
    fn scan(&self, text: &str, truncated: &mut bool, add: &mut dyn FnMut(i32)) {
        let working = format!(" {text} ");

        let (working, hit_cap) =
            rewrite_to_fixed_point("two-digit year", &SHORTHAND, working, widen_shorthand);
        *truncated |= hit_cap;

        let (working, hit_cap) =
            rewrite_to_fixed_point("slash-year range", &SLASH_OPEN_RANGE, working, |caps| {
                let end = caps.get(4).or_else(|| caps.get(3));
                self.add_range(year_at(caps.get(1)), year_at(end), &mut *add);
                " ".to_string()
            });
        *truncated |= hit_cap;

        let (working, hit_cap) =
            rewrite_to_fixed_point("slash-year range", &SLASH_CLOSE_RANGE, working, |caps| {
                self.add_range(year_at(caps.get(1)), year_at(caps.get(3)), &mut *add);
                " ".to_string()
            });
        *truncated |= hit_cap;

        let (working, hit_cap) =
            rewrite_to_fixed_point("dash range", &DASH_RANGE, working, |caps| {
                self.add_range(year_at(caps.get(1)), year_at(caps.get(2)), &mut *add);
                " ".to_string()
            });
        *truncated |= hit_cap;

        let (working, hit_cap) =
            rewrite_to_fixed_point("open range", &OPEN_RANGE, working, |caps| {
                self.add_range(year_at(caps.get(1)), ONGOING_YEAR, &mut *add);
                " ".to_string()
            });
        *truncated |= hit_cap;

        for token in year_tokens(&working) {
            add(token.year);
        }
    }

    /// Every year from `start` to `end` inclusive. An ongoing end stops at
    /// last year; a reversed range contributes only its two endpoints.
    fn add_range(&self, start: i32, end: i32, add: &mut dyn FnMut(i32)) {
        let open = end == ONGOING_YEAR;
        let end = if open { self.current_year - 1 } else { end };
        if start <= end {
            (start..=end).for_each(&mut *add);
        } else {
            add(start);
            if !open {
                add(end);
            }
        }
    }
}

fn year_at(m: Option<regex::Match<'_>>) -> i32 {
    m.and_then(|m| m.as_str().parse().ok()).unwrap_or(0)
}

/// `1823-46` → `1823-1846`. A right side below the left rolls into the next
/// century only for short spans (`1998-02`); anything else is left alone.
fn widen_shorthand(caps: &Captures<'_>) -> String {
    let left = year_at(caps.get(1));
    let right = year_at(caps.get(3));
    let mut widened = left / 100 * 100 + right;
    if widened < left {
        widened += 100;
        if widened - left > 10 {
            return caps[0].to_string();
        }
    }
    format!("{}{}{widened}", &caps[1], &caps[2])
}

/// `Dec 1990-Jan 91` → `Dec 1990-Jan 1991`. Two digits after a month are
/// read as a day unless they name the following year, or a year up to a
/// decade on that could not be a day.
fn widen_month_shorthand(caps: &Captures<'_>) -> String {
    let left = year_at(caps.get(1));
    let right = year_at(caps.get(3));
    let mut widened = left / 100 * 100 + right;
    if widened < left {
        widened += 100;
    }
    let span = widened - left;
    if span > 10 || (right <= 31 && span > 1) {
        return caps[0].to_string();
    }
    format!("{}{}{widened}{}", &caps[1], &caps[2], &caps[4])
}

/// Drop every year before a gap of more than a century.
fn drop_implausible(years: Vec<i32>) -> Vec<i32> {
    let mut kept: Vec<i32> = Vec::with_capacity(years.len());
    for year in years {
        if kept.last().is_some_and(|&previous| year - previous > IMPLAUSIBLE_GAP) {
            kept.clear();
        }
        kept.push(year);
    }
    kept
}

/// Every plausible year in `text`, sorted and unique, using the system clock.
///
/// # Examples
///
/// ```
/// use serial_holdings::years::extract_all_years;
///
/// assert_eq!(extract_all_years("1988-1992 (lacks 1990)"), [1988, 1989, 1991, 1992]);
/// assert!(extract_all_years("no. 12345").is_empty());
/// ```
#[must_use]
pub fn extract_all_years(text: &str) -> Vec<i32> {
    YearExtractor::new().all_years(text)
}

/// First and last plausible year in `text`, using the system clock.
#[must_use]
pub fn extract_first_last(text: &str) -> Option<(i32, i32)> {
    YearExtractor::new().first_last(text)
}

/// Plausible years in `text` in compact run notation, using the system clock.
#[must_use]
pub fn concatenated_year_range(text: &str) -> String {
    YearExtractor::new().concatenated_year_range(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i32 = 2024;

    fn years(text: &str) -> Vec<i32> {
        YearExtractor::with_current_year(NOW).all_years(text)
    }

    #[test]
    fn test_plain_range_is_expanded() {
        assert_eq!(years("1971-1975"), vec![1971, 1972, 1973, 1974, 1975]);
    }

    #[test]
    fn test_holdings_statement() {
        assert_eq!(
            years("v.21:no.3 (1988:Mar)-v.25 (1992)"),
            vec![1988, 1989, 1990, 1991, 1992]
        );
        assert_eq!(years("v.1-10 (1990-1999)"), (1990..=1999).collect::<Vec<_>>());
    }

    #[test]
    fn test_two_digit_shorthand() {
        let found = years("1823-46");
        assert_eq!(found.first(), Some(&1823));
        assert_eq!(found.last(), Some(&1846));
        assert_eq!(found.len(), 24);
        assert_eq!(years("1990/91"), vec![1990, 1991]);
        assert_eq!(years("1998-02"), vec![1998, 1999, 2000, 2001, 2002]);
        // A month number, not a year
        assert_eq!(years("1990-12"), vec![1990]);
    }

    #[test]
    fn test_slash_year_ranges() {
        assert_eq!(
            years("1966/1967-1969/1970"),
            vec![1966, 1967, 1968, 1969, 1970]
        );
        assert_eq!(years("1966-1967/1968"), vec![1966, 1967, 1968]);
    }

    #[test]
    fn test_two_digit_year_after_month() {
        assert_eq!(years("Dec 1990-Jan 91"), vec![1990, 1991]);
        assert_eq!(years("Dec 2009-Jan 10"), vec![2009, 2010]);
        // A day of the month, not a year
        assert_eq!(years("Dec 1990-Jan 15"), vec![1990]);
        assert_eq!(years("Mar 2005-Apr 10"), vec![2005]);
    }

    #[test]
    fn test_days_do_not_leak_years() {
        assert_eq!(
            years("v.1 (1990:Jan 15)-v.5 (1995:Dec 1)"),
            (1990..=1995).collect::<Vec<_>>()
        );
        assert_eq!(years("v.3 (1999:Sep/Oct 18/24)"), vec![1999]);
    }

    #[test]
    fn test_open_ranges_stop_at_last_year() {
        assert_eq!(years("2020- )"), vec![2020, 2021, 2022, 2023]);
        assert_eq!(years("v.5 (2021)-"), vec![2021, 2022, 2023]);
        assert_eq!(years("2019-9999"), vec![2019, 2020, 2021, 2022, 2023]);
        assert_eq!(years("2024-"), vec![2024]);
    }

    #[test]
    fn test_volume_close_without_date_is_not_open() {
        assert_eq!(years("v.1 (1990)-v.10"), vec![1990]);
        let found = years("v.1 (1990)-v.10; v.12 (2001)-");
        assert_eq!(found[..2], [1990, 2001]);
        assert_eq!(found.last(), Some(&2023));
    }

    #[test]
    fn test_supplement_years_kept() {
        assert_eq!(years("suppl 1995-1997"), vec![1995, 1996, 1997]);
        assert_eq!(years("suppl 1991 annual"), vec![1991]);
    }

    #[test]
    fn test_exclusion_cancels_one_inclusion() {
        assert_eq!(years("1990, 1990 (lacks 1990)"), vec![1990]);
        assert!(years("1990 (lacks 1990)").is_empty());
        assert_eq!(years("1988-1992 (lacks 1990)"), vec![1988, 1989, 1991, 1992]);
        assert_eq!(years("1990-1995 w/o 1991-1992"), vec![1990, 1993, 1994, 1995]);
    }

    #[test]
    fn test_excluded_years_reported() {
        let outcome = YearExtractor::with_current_year(NOW).extract("1990-1992 (wanting 1991)");
        assert_eq!(outcome.years, vec![1990, 1992]);
        assert_eq!(outcome.excluded, vec![1991]);
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_validity_gate() {
        assert_eq!(years("2023-2026"), vec![2023, 2024]);
        assert_eq!(years("1990 2030"), vec![1990]);
    }

    #[test]
    fn test_implausible_outlier_dropped() {
        assert_eq!(years("1850, 1990, 1991"), vec![1990, 1991]);
        assert_eq!(years("1900, 1990"), vec![1900, 1990]);
    }

    #[test]
    fn test_multilingual_months() {
        assert_eq!(years("janvier 1990-décembre 1991"), vec![1990, 1991]);
        assert_eq!(years("Spring 1990-Winter 1992"), vec![1990, 1991, 1992]);
        assert_eq!(years("Mar 15 1990-Apr 2 1991"), vec![1990, 1991]);
    }

    #[test]
    fn test_noise_is_ignored() {
        assert!(years("no years here").is_empty());
        assert!(years("reel 1234").is_empty());
        assert!(years("2nd ser. no. 1999").is_empty());
        assert_eq!(years("1990 ser. 2"), vec![1990]);
        assert_eq!(years("Atti del congresso del 1990"), vec![1990]);
    }

    #[test]
    fn test_first_last_and_concatenation() {
        let extractor = YearExtractor::with_current_year(NOW);
        assert_eq!(extractor.first_last("1990"), Some((1990, 1990)));
        assert_eq!(extractor.first_last("nothing"), None);
        assert_eq!(
            extractor.concatenated_year_range("1990, 1991, 1992, 1995"),
            "1990-1992, 1995"
        );
    }

    #[test]
    fn test_check_year_between_uses_fixed_year() {
        let extractor = YearExtractor::with_current_year(2000);
        assert_eq!(extractor.check_year_between("1990", "2001", "1995"), Some(true));
        assert_eq!(extractor.check_year_between("1990", "2005", "1995"), None);
    }

    #[test]
    fn test_year_tokens_skip_longer_numbers() {
        let tokens = year_tokens(" 19901 1990a 1599 2001/2002");
        let found: Vec<i32> = tokens.iter().map(|t| t.year).collect();
        assert_eq!(found, vec![1990, 2001, 2002]);
    }
}
