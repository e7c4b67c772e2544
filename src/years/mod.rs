//! Year and year-range extraction from free text.
//!
//! Holdings statements, 362 notes and spreadsheet cells all carry dates in
//! loosely structured text. [`YearExtractor`] pulls every plausible year out
//! of such a string; the free functions here do the same against the system
//! clock.
//!
//! ```
//! use serial_holdings::YearExtractor;
//!
//! let extractor = YearExtractor::with_current_year(2024);
//! let text = "v.21:no.3 (1988:Mar)-v.25 (1992) (lacks 1990)";
//! assert_eq!(extractor.all_years(text), [1988, 1989, 1991, 1992]);
//! assert_eq!(extractor.concatenated_year_range(text), "1988-1989, 1991-1992");
//! ```

pub mod cleanup;
pub mod extract;
pub mod range;

pub use cleanup::{clean_holdings_text, RewritePass, CLEANUP_PASSES, MAX_REWRITE_PASSES};
pub use extract::{
    concatenated_year_range, extract_all_years, extract_first_last, year_tokens,
    ExtractionOutcome, YearExtractor, YearToken,
};
pub use range::{
    check_year_between, concatenate_years, year_runs, YearRange, FIRST_YEAR, ONGOING_YEAR,
};
