#![warn(missing_docs)]

//! # serial-holdings: holdings and date-range normalization for serials
//!
//! Reads MARC records in mnemonic text form (`=TAG  ii$a...`), renders the
//! coded 85x/86x holdings as display statements, and pulls the held years out
//! of holdings and date text so they can be checked against the record's
//! publication dates.
//!
//! ## Quick Start
//!
//! ```
//! use serial_holdings::{HoldingsConverter, Record, YearExtractor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = Record::from_mnemonic(
//!     "=LDR  00000cas a2200000 a 4500\n\
//!      =022  \\\\$a0028-0836\n\
//!      =853  20$81$av.$bno.$i(year)$j(month)\n\
//!      =863  40$81.1$a21-25$b3-$i1988-1992$j03-\n",
//! )?;
//! assert_eq!(record.issn(), ["0028-0836"]);
//!
//! let converted = HoldingsConverter::default().convert(&record);
//! let text = converted.statements[0].text.as_str();
//! assert_eq!(text, "v.21:no.3 (1988:Mar)-v.25 (1992)");
//!
//! let years = YearExtractor::with_current_year(2024).all_years(text);
//! assert_eq!(years, [1988, 1989, 1990, 1991, 1992]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`record`] — `Record`, `Field`, `Subfield` and mnemonic parsing entry points
//! - [`accessors`] — the memoized accessor table (OCLC, ISSN, title, 008 values...)
//! - [`leader`] and [`fixed_fields`] — leader and 008/007 positions by material
//! - [`identifiers`] — OCLC, ISSN and LCCN cleanup
//! - [`normalize`] — month, season and enumeration word folding
//! - [`holdings`] — the 85x/86x caption/data converter
//! - [`years`] — year and range extraction
//! - [`batch`] — the whole pipeline per record, optionally in parallel
//! - [`reader`] and [`encoding`] — splitting and decoding mnemonic files
//! - [`marcxml`] — MARCXML to mnemonic conversion
//! - [`config`], [`warning`] and [`error`] — configuration and diagnostics

pub mod accessors;
pub mod batch;
pub mod config;
pub mod encoding;
pub mod error;
pub mod fixed_fields;
pub mod holdings;
pub mod identifiers;
pub mod leader;
pub mod macros;
pub mod marcxml;
mod mnemonic;
pub mod normalize;
pub mod reader;
/// Core MARC record structures (`Record`, `Field`, `Subfield`)
pub mod record;
pub mod warning;
pub mod years;

pub use accessors::{Accessor, AccessorValue};
pub use batch::{holdings_years, holdings_years_parallel, RecordYears};
pub use config::{HoldingsConfig, LocalField, RecordSource};
pub use encoding::TextEncoding;
pub use error::{MarcError, Result};
pub use holdings::{ConversionResult, HoldingsConverter, HoldingsStatement, LinkKey};
pub use identifiers::{clean_oclc_number, format_issn, validate_issn_checksum};
pub use leader::{Leader, Material};
pub use normalize::{normalize_enumeration, normalize_months, normalize_seasons};
pub use reader::MnemonicReader;
pub use record::{Field, Record, Subfield};
pub use warning::{FieldWarning, WarningKind};
pub use years::{
    check_year_between, concatenated_year_range, extract_all_years, extract_first_last,
    ExtractionOutcome, YearExtractor, YearRange,
};
