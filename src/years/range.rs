//! Compact year-run notation and fuzzy 008 date comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest year the engine treats as real.
pub const FIRST_YEAR: i32 = 1600;

/// MARC sentinel for "still being published".
pub const ONGOING_YEAR: i32 = 9999;

/// An inclusive run of consecutive years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// First year of the run
    pub start: i32,
    /// Last year of the run
    pub end: i32,
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Collapse years into runs of consecutive values.
///
/// Input need not be sorted; duplicates are ignored.
#[must_use]
pub fn year_runs(years: &[i32]) -> Vec<YearRange> {
    let mut sorted = years.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut runs: Vec<YearRange> = Vec::new();
    for year in sorted {
        match runs.last_mut() {
            Some(run) if run.end + 1 == year => run.end = year,
            _ => runs.push(YearRange {
                start: year,
                end: year,
            }),
        }
    }
    runs
}

/// Compact notation for a set of years.
///
/// # Examples
///
/// ```
/// use serial_holdings::years::concatenate_years;
///
/// assert_eq!(concatenate_years(&[1990, 1991, 1992, 1995]), "1990-1992, 1995");
/// assert_eq!(concatenate_years(&[]), "");
/// ```
#[must_use]
pub fn concatenate_years(years: &[i32]) -> String {
    year_runs(years)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn is_valid_year(year: i32, current_year: i32) -> bool {
    (FIRST_YEAR..=current_year).contains(&year) || year == ONGOING_YEAR
}

/// A 4-character 008 date where `u` marks unknown digits. Unknown digits
/// become `0` for a lower bound and `9` for an upper bound.
fn fuzzy_year(value: &str, fill: char) -> Option<i32> {
    let value = value.trim();
    if value.chars().count() != 4
        || !value.chars().all(|c| c.is_ascii_digit() || c.eq_ignore_ascii_case(&'u'))
    {
        return None;
    }
    value
        .chars()
        .map(|c| if c.is_ascii_digit() { c } else { fill })
        .collect::<String>()
        .parse()
        .ok()
}

/// Whether `candidate` falls between two 008 dates, inclusive.
///
/// Returns `None` when any input is not a usable year: not four digits, or
/// outside 1600 through next year (9999 is always allowed). A candidate
/// equal to either resolved bound is `Some(true)` before any of those checks.
///
/// Uses the system clock for the current year; see
/// [`crate::YearExtractor::check_year_between`] for a fixed year.
///
/// # Examples
///
/// ```
/// use serial_holdings::years::check_year_between;
///
/// assert_eq!(check_year_between("1990", "1995", "1992"), Some(true));
/// assert_eq!(check_year_between("1990", "1995", "1999"), Some(false));
/// assert_eq!(check_year_between("19uu", "20uu", "1900"), Some(true));
/// assert_eq!(check_year_between("1990", "abcd", "1992"), None);
/// ```
#[must_use]
pub fn check_year_between(start: &str, end: &str, candidate: &str) -> Option<bool> {
    check_year_between_at(start, end, candidate, crate::config::system_year())
}

pub(crate) fn check_year_between_at(
    start: &str,
    end: &str,
    candidate: &str,
    current_year: i32,
) -> Option<bool> {
    let candidate: i32 = {
        let c = candidate.trim();
        if c.len() == 4 && c.chars().all(|ch| ch.is_ascii_digit()) {
            c.parse().ok()?
        } else {
            return None;
        }
    };
    let start = fuzzy_year(start, '0');
    let end = fuzzy_year(end, '9');

    if start == Some(candidate) || end == Some(candidate) {
        return Some(true);
    }

    let reasonable = |year: i32| is_valid_year(year, current_year + 1);
    let (start, end) = (start?, end?);
    if !reasonable(start) || !reasonable(end) || !reasonable(candidate) {
        return None;
    }
    Some(start <= candidate && candidate <= end)
}
