//! End-to-end holdings summaries for one record or many.
//!
//! This is the whole pipeline in one call: 85x/86x conversion, textual
//! holdings, year extraction, and a check of the first and last held years
//! against the 008 publication dates.
//!
//! [`holdings_years_parallel`] fans records out over the rayon thread pool.
//! Records share nothing, so results come back in input order with no
//! coordination beyond the collect.

use crate::config::HoldingsConfig;
use crate::holdings::HoldingsConverter;
use crate::record::Record;
use crate::warning::FieldWarning;
use crate::years::{concatenate_years, range::check_year_between_at, YearExtractor};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

/// Held years and related findings for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordYears {
    /// Rendered 86x statements followed by 866-868 textual holdings
    pub statements: Vec<String>,
    /// Every held year across all statements, sorted and unique
    pub years: Vec<i32>,
    /// `years` collapsed into ranges, e.g. `1988-1989, 1991`
    pub summary: String,
    /// Whether both the first and last held year fall inside the 008 date
    /// range. `None` when there are no years or the dates are unusable.
    pub within_publication_dates: Option<bool>,
    /// Set when any extraction hit its rewrite cap
    pub truncated: bool,
    /// Parser and converter warnings for the record
    pub warnings: Vec<FieldWarning>,
}

/// Summarize one record.
///
/// # Examples
///
/// ```
/// use serial_holdings::{batch::holdings_years, HoldingsConfig, Record};
///
/// let record = Record::from_mnemonic(
///     "=LDR  00000cas a2200000 a 4500\n\
///      =008  850101c19859999nyuqr\\p\\\\\\\\\\\\\\0\\\\\\\\\\eng\\d\n\
///      =853  20$81$av.$i(year)\n\
///      =863  40$81.1$a1-3$i1985-1987\n",
/// )?;
/// let config = HoldingsConfig::new().with_current_year(2024);
/// let summary = holdings_years(&record, &config);
/// assert_eq!(summary.statements, ["v.1 (1985)-v.3 (1987)"]);
/// assert_eq!(summary.summary, "1985-1987");
/// assert_eq!(summary.within_publication_dates, Some(true));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn holdings_years(record: &Record, config: &HoldingsConfig) -> RecordYears {
    let converter = HoldingsConverter::new(config);
    let extractor = YearExtractor::from_config(config);

    let conversion = converter.convert(record);
    let statements: Vec<String> = conversion
        .texts()
        .map(str::to_string)
        .chain(record.textual_holdings().iter().cloned())
        .collect();

    let mut years = BTreeSet::new();
    let mut truncated = false;
    for statement in &statements {
        let outcome = extractor.extract(statement);
        truncated |= outcome.truncated;
        years.extend(outcome.years);
    }
    let years: Vec<i32> = years.into_iter().collect();

    let within_publication_dates = match (years.first(), years.last()) {
        (Some(first), Some(last)) => {
            let current = extractor.current_year();
            let check = |year: i32| {
                check_year_between_at(record.date1(), record.date2(), &year.to_string(), current)
            };
            match (check(*first), check(*last)) {
                (Some(a), Some(b)) => Some(a && b),
                _ => None,
            }
        }
        _ => None,
    };

    let mut warnings = record.warnings().to_vec();
    warnings.extend(conversion.warnings);

    RecordYears {
        summary: concatenate_years(&years),
        statements,
        years,
        within_publication_dates,
        truncated,
        warnings,
    }
}

/// Summarize many records on the rayon thread pool, preserving input order.
#[must_use]
pub fn holdings_years_parallel(records: &[Record], config: &HoldingsConfig) -> Vec<RecordYears> {
    tracing::debug!(records = records.len(), "summarizing holdings in parallel");
    records
        .par_iter()
        .map(|record| holdings_years(record, config))
        .collect()
}
