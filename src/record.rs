//! MARC bibliographic record structures.
//!
//! This module provides the core record types:
//! - [`Record`] — leader, control fields and data fields of one record
//! - [`Field`] — a data field (010+) with indicators and subfields
//! - [`Subfield`] — one `(code, value)` pair
//!
//! Records are built from mnemonic text by [`Record::from_mnemonic`] and are
//! immutable afterwards. Derived values (OCLC number, ISSNs, title, dates…)
//! come from the fixed [`Accessor`] table and are computed once per record.
//!
//! # Examples
//!
//! ```
//! use serial_holdings::Record;
//!
//! let record = Record::from_mnemonic(
//!     "=LDR  00000cas a2200000 a 4500\n=001  ocm12345678\n=245  00$aNature.",
//! )?;
//! assert_eq!(record.title(), "Nature");
//! for field in record.fields_by_tag("245") {
//!     assert_eq!(field.get_subfield('a'), Some("Nature."));
//! }
//! # Ok::<(), serial_holdings::MarcError>(())
//! ```

use crate::accessors::{Accessor, AccessorValue};
use crate::config::{HoldingsConfig, LocalField, RecordSource};
use crate::error::Result;
use crate::leader::Leader;
use crate::warning::FieldWarning;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A MARC record parsed from mnemonic text.
///
/// Fields are stored per tag in insertion order using `IndexMap`. Each field
/// also keeps its source line number so interleaved tags (853, 863, 853, ...)
/// can be replayed in document order.
#[derive(Debug, Clone)]
pub struct Record {
    leader: Leader,
    control_fields: IndexMap<String, Vec<String>>,
    fields: IndexMap<String, Vec<Field>>,
    warnings: Vec<FieldWarning>,
    provenance: Provenance,
    cache: AccessorCache,
}

/// A data field in a MARC record (fields 010 and higher)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field tag (3 characters)
    pub tag: String,
    /// First indicator (blank is `' '`)
    pub indicator1: char,
    /// Second indicator (blank is `' '`)
    pub indicator2: char,
    /// Subfields in source order; codes may repeat
    pub subfields: SmallVec<[Subfield; 4]>,
    /// 1-based line number in the source text, 0 when built in code
    pub line: usize,
}

/// A subfield within a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value
    pub value: String,
}

/// What the OCLC resolution needs to know about where a record came from.
#[derive(Debug, Clone, Default)]
pub(crate) struct Provenance {
    pub(crate) source: RecordSource,
    pub(crate) local_oclc_field: Option<LocalField>,
}

impl From<&HoldingsConfig> for Provenance {
    fn from(config: &HoldingsConfig) -> Self {
        Provenance {
            source: config.record_source,
            local_oclc_field: config.local_oclc_field.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct AccessorCache {
    cells: [OnceCell<AccessorValue>; Accessor::COUNT],
}

impl Default for AccessorCache {
    fn default() -> Self {
        AccessorCache {
            cells: std::array::from_fn(|_| OnceCell::new()),
        }
    }
}

impl Record {
    /// Parse one record from mnemonic text with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MarcError::MissingLeader`] if the text has no `=LDR`
    /// line. Every other problem becomes a warning on the record.
    pub fn from_mnemonic(text: &str) -> Result<Self> {
        crate::mnemonic::parse_record(text, &HoldingsConfig::default())
    }

    /// Parse one record from mnemonic text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MarcError::MissingLeader`] if the text has no `=LDR` line.
    pub fn from_mnemonic_with_config(text: &str, config: &HoldingsConfig) -> Result<Self> {
        crate::mnemonic::parse_record(text, config)
    }

    pub(crate) fn from_parts(
        leader: Leader,
        control_fields: IndexMap<String, Vec<String>>,
        fields: IndexMap<String, Vec<Field>>,
        warnings: Vec<FieldWarning>,
        provenance: Provenance,
    ) -> Self {
        Record {
            leader,
            control_fields,
            fields,
            warnings,
            provenance,
            cache: AccessorCache::default(),
        }
    }

    /// The record leader.
    #[must_use]
    pub fn leader(&self) -> &Leader {
        &self.leader
    }

    /// Warnings collected while parsing, in source order.
    #[must_use]
    pub fn warnings(&self) -> &[FieldWarning] {
        &self.warnings
    }

    pub(crate) fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// First value of a control field (001-009).
    #[must_use]
    pub fn get_control_field(&self, tag: &str) -> Option<&str> {
        self.control_fields
            .get(tag)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a repeatable control field such as 007.
    #[must_use]
    pub fn get_control_fields(&self, tag: &str) -> &[String] {
        self.control_fields.get(tag).map_or(&[], Vec::as_slice)
    }

    /// Get all fields with a given tag
    #[must_use]
    pub fn get_fields(&self, tag: &str) -> Option<&[Field]> {
        self.fields.get(tag).map(Vec::as_slice)
    }

    /// Get first field with a given tag
    #[must_use]
    pub fn get_field(&self, tag: &str) -> Option<&Field> {
        self.fields.get(tag).and_then(|v| v.first())
    }

    /// Iterate over all data fields, grouped by tag in first-seen order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values().flat_map(|v| v.iter())
    }

    /// Iterate over fields matching a specific tag
    pub fn fields_by_tag(&self, tag: &str) -> impl Iterator<Item = &Field> {
        self.fields.get(tag).map(|v| v.iter()).into_iter().flatten()
    }

    /// Fields with any of the given tags, in the order they appeared in the
    /// source text.
    #[must_use]
    pub fn fields_in_source_order(&self, tags: &[&str]) -> Vec<&Field> {
        let mut selected: Vec<&Field> = tags
            .iter()
            .flat_map(|tag| self.fields_by_tag(tag))
            .collect();
        selected.sort_by_key(|f| f.line);
        selected
    }

    /// Look up a derived value through the accessor table.
    ///
    /// The value is computed on first access and cached for the lifetime of
    /// the record. Absent data yields an empty value, never an error.
    #[must_use]
    pub fn value(&self, accessor: Accessor) -> &AccessorValue {
        self.cache.cells[accessor.index()]
            .get_or_init(|| crate::accessors::compute(self, accessor))
    }
}

impl Field {
    /// Create a new data field
    #[must_use]
    pub fn new(tag: String, indicator1: char, indicator2: char) -> Self {
        Field {
            tag,
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
            line: 0,
        }
    }

    /// Add a subfield
    pub fn add_subfield(&mut self, code: char, value: String) {
        self.subfields.push(Subfield { code, value });
    }

    /// Add a subfield using a string slice
    pub fn add_subfield_str(&mut self, code: char, value: &str) {
        self.add_subfield(code, value.to_string());
    }

    /// Get first subfield value with a given code
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Iterate over all values of a subfield code
    pub fn subfields_by_code(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Check if the field has a subfield with the given code
    #[must_use]
    pub fn has_subfield(&self, code: char) -> bool {
        self.subfields.iter().any(|sf| sf.code == code)
    }

    /// Render the field as one mnemonic line, e.g. `=863  40$81.1$a5`.
    ///
    /// Blank indicators are written as `\` and a literal `$` as `{dollar}`.
    #[must_use]
    pub fn to_mnemonic(&self) -> String {
        let indicator = |c: char| if c == ' ' { '\\' } else { c };
        let mut line = format!(
            "={}  {}{}",
            self.tag,
            indicator(self.indicator1),
            indicator(self.indicator2)
        );
        for sf in &self.subfields {
            line.push('$');
            line.push(sf.code);
            line.push_str(&sf.value.replace('$', "{dollar}"));
        }
        line
    }
}
