//! Integration tests for the year engine and lexical normalizers.

mod common;

use common::CURRENT_YEAR;
use serial_holdings::{
    check_year_between, normalize_enumeration, normalize_months, normalize_seasons, YearExtractor,
};

fn extractor() -> YearExtractor {
    YearExtractor::with_current_year(CURRENT_YEAR)
}

#[test]
fn test_range_expansion_is_complete() {
    assert_eq!(
        extractor().all_years("1971-1975"),
        [1971, 1972, 1973, 1974, 1975]
    );
}

#[test]
fn test_exclusion_cancels_exactly_one_inclusion() {
    let years = extractor().all_years("1990, 1990 (lacks 1990)");
    assert_eq!(years.iter().filter(|&&y| y == 1990).count(), 1);

    let outcome = extractor().extract("1990-1992 (lacks 1991)");
    assert_eq!(outcome.years, [1990, 1992]);
    assert_eq!(outcome.excluded, [1991]);
}

#[test]
fn test_fuzzy_bound_equality_short_circuits() {
    assert_eq!(check_year_between("19uu", "20uu", "1900"), Some(true));
    assert_eq!(check_year_between("1990", "1995", "1990"), Some(true));
    assert_eq!(check_year_between("1990", "1995", "abcd"), None);
}

#[test]
fn test_first_last_and_concatenation() {
    let text = "v.21:no.3 (1988:Mar)-v.25 (1992) (lacks 1990)";
    assert_eq!(extractor().first_last(text), Some((1988, 1992)));
    assert_eq!(extractor().concatenated_year_range(text), "1988-1989, 1991-1992");
    assert_eq!(extractor().first_last("no dates"), None);
    assert_eq!(extractor().concatenated_year_range("no dates"), "");
}

#[test]
fn test_open_range_closes_last_year() {
    let years = extractor().all_years("2020- )");
    assert_eq!(years.last(), Some(&(CURRENT_YEAR - 1)));
}

#[test]
fn test_multilingual_dates() {
    assert_eq!(
        extractor().all_years("janvier 1990-décembre 1991"),
        [1990, 1991]
    );
    assert_eq!(
        extractor().all_years("Spring 1990-Winter 1992"),
        [1990, 1991, 1992]
    );
}

#[test]
fn test_month_normalization_leaves_other_words_alone() {
    assert_eq!(normalize_months("The Fall of Rome"), "The Fall of Rome");
    assert_eq!(normalize_months("Marsh notes"), "Marsh notes");
    assert_eq!(normalize_seasons("The Fall of Rome"), "The Fall of Rome");
}

#[test]
fn test_normalizers_are_idempotent_on_canonical_text() {
    let canonical = "v.1:no.2 (1990:Mar) Spring 1991";
    assert_eq!(normalize_months(canonical), canonical);
    assert_eq!(normalize_seasons(canonical), canonical);
    assert_eq!(normalize_enumeration(canonical), canonical);
}

#[test]
fn test_days_and_short_years_after_months() {
    assert_eq!(extractor().all_years("Dec 1990-Jan 91"), [1990, 1991]);
    assert_eq!(
        extractor().all_years("v.1 (1990:Jan 15)-v.5 (1995:Dec 1)"),
        (1990..=1995).collect::<Vec<_>>()
    );
}

#[test]
fn test_prose_words_do_not_swallow_years() {
    assert_eq!(extractor().all_years("Atti del congresso del 1990"), [1990]);
    assert_eq!(extractor().all_years("1990 ser. 2"), [1990]);
    assert_eq!(extractor().all_years("v.1 (1990)-v.10"), [1990]);
}
