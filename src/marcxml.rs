//! MARCXML input, converted to mnemonic text.
//!
//! Holdings exports sometimes arrive as MARCXML
//! (<https://www.loc.gov/standards/marcxml/>) rather than mnemonic text. This
//! module reads either a single `<record>` or a `<collection>` of them, in the
//! default-namespace (`<record xmlns="...">`) or prefix-namespace
//! (`<marc:record xmlns:marc="...">`) form, and renders each record as a
//! mnemonic block that [`Record::from_mnemonic`] accepts.
//!
//! # Examples
//!
//! ```
//! use serial_holdings::marcxml;
//!
//! let xml = r#"<record xmlns="http://www.loc.gov/MARC21/slim">
//!   <leader>00000cy  a22000003  4500</leader>
//!   <datafield tag="853" ind1="2" ind2="0">
//!     <subfield code="8">1</subfield>
//!     <subfield code="a">v.</subfield>
//!   </datafield>
//! </record>"#;
//!
//! let blocks = marcxml::marcxml_to_mnemonic(xml)?;
//! assert_eq!(blocks[0], "=LDR  00000cy\\\\a22000003\\\\4500\n=853  20$81$av.\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::HoldingsConfig;
use crate::error::{MarcError, Result};
use crate::record::{Field, Record};
use lazy_static::lazy_static;
use quick_xml::de::from_str as xml_from_str;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref XMLNS_DECLARATION: Regex =
        Regex::new(r#"\s+xmlns(?::\w+)?="[^"]*""#).expect("valid regex");
    static ref ELEMENT_PREFIX: Regex = Regex::new(r"<(/?)(\w+):").expect("valid regex");
    static ref COLLECTION_ROOT: Regex =
        Regex::new(r"^\s*(?:<\?[^>]*\?>\s*)?(?:<!--.*?-->\s*)*<collection\b")
            .expect("valid regex");
}

/// A MARCXML `<record>` element.
#[derive(Debug, Deserialize)]
#[serde(rename = "record")]
pub struct MarcxmlRecord {
    /// Leader text
    #[serde(default)]
    pub leader: Option<String>,
    /// Control fields (tags 001-009)
    #[serde(default)]
    pub controlfield: Vec<MarcxmlControlField>,
    /// Data fields (tags 010+)
    #[serde(default)]
    pub datafield: Vec<MarcxmlDataField>,
}

/// A MARCXML `<controlfield>` element.
#[derive(Debug, Deserialize)]
pub struct MarcxmlControlField {
    /// Field tag attribute
    #[serde(rename = "@tag")]
    pub tag: String,
    /// Text content
    #[serde(default, rename = "$value")]
    pub value: String,
}

/// A MARCXML `<datafield>` element.
#[derive(Debug, Deserialize)]
pub struct MarcxmlDataField {
    /// Field tag attribute
    #[serde(rename = "@tag")]
    pub tag: String,
    /// First indicator attribute
    #[serde(default, rename = "@ind1")]
    pub ind1: String,
    /// Second indicator attribute
    #[serde(default, rename = "@ind2")]
    pub ind2: String,
    /// Subfields in document order
    #[serde(default)]
    pub subfield: Vec<MarcxmlSubfield>,
}

/// A MARCXML `<subfield>` element.
#[derive(Debug, Deserialize)]
pub struct MarcxmlSubfield {
    /// Subfield code attribute
    #[serde(rename = "@code")]
    pub code: String,
    /// Text content
    #[serde(default, rename = "$value")]
    pub value: String,
}

/// A MARCXML `<collection>` wrapper.
#[derive(Debug, Deserialize)]
#[serde(rename = "collection")]
pub struct MarcxmlCollection {
    /// Records in the collection
    #[serde(default, rename = "record")]
    pub records: Vec<MarcxmlRecord>,
}

/// Remove namespace declarations and element prefixes so both namespace
/// styles deserialize into the same structs.
fn strip_marcxml_ns(xml: &str) -> String {
    let stripped = XMLNS_DECLARATION.replace_all(xml, "");
    ELEMENT_PREFIX.replace_all(&stripped, "<$1").into_owned()
}

fn indicator(value: &str) -> char {
    match value.chars().next() {
        None | Some(' ') => ' ',
        Some(c) => c,
    }
}

fn fixed_text(value: &str) -> String {
    value.replace(' ', "\\")
}

impl MarcxmlRecord {
    /// Render as a mnemonic block, one `=TAG` line per field, ending in a newline.
    ///
    /// Control fields come first, then data fields, each in document order.
    /// A record without a `<leader>` produces a block without an `=LDR` line,
    /// which later fails to parse like any other leaderless block.
    #[must_use]
    pub fn to_mnemonic(&self) -> String {
        let mut lines = Vec::with_capacity(1 + self.controlfield.len() + self.datafield.len());
        if let Some(leader) = &self.leader {
            lines.push(format!("=LDR  {}", fixed_text(leader)));
        }
        for cf in &self.controlfield {
            lines.push(format!("={}  {}", cf.tag, fixed_text(&cf.value)));
        }
        for df in &self.datafield {
            let mut field = Field::new(df.tag.clone(), indicator(&df.ind1), indicator(&df.ind2));
            for sf in &df.subfield {
                if let Some(code) = sf.code.chars().next() {
                    field.add_subfield(code, sf.value.clone());
                }
            }
            lines.push(field.to_mnemonic());
        }

        let mut block = lines.join("\n");
        block.push('\n');
        block
    }
}

/// Parse MARCXML into its records, whatever the root element.
///
/// # Errors
///
/// Returns [`MarcError::Xml`] if the document is not well-formed MARCXML.
pub fn parse_marcxml(xml: &str) -> Result<Vec<MarcxmlRecord>> {
    let cleaned = strip_marcxml_ns(xml);
    if COLLECTION_ROOT.is_match(&cleaned) {
        let collection: MarcxmlCollection = xml_from_str(&cleaned)
            .map_err(|e| MarcError::Xml(format!("failed to parse MARCXML collection: {e}")))?;
        Ok(collection.records)
    } else {
        let record: MarcxmlRecord = xml_from_str(&cleaned)
            .map_err(|e| MarcError::Xml(format!("failed to parse MARCXML record: {e}")))?;
        Ok(vec![record])
    }
}

/// Convert MARCXML to mnemonic blocks, one per record.
///
/// # Errors
///
/// Returns [`MarcError::Xml`] if the document cannot be parsed.
pub fn marcxml_to_mnemonic(xml: &str) -> Result<Vec<String>> {
    let records = parse_marcxml(xml)?;
    tracing::debug!(records = records.len(), "converted MARCXML to mnemonic");
    Ok(records.iter().map(MarcxmlRecord::to_mnemonic).collect())
}

/// Convert MARCXML straight to parsed records.
///
/// Each record is parsed independently, so one leaderless record yields an
/// `Err` in its slot without affecting the others.
///
/// # Errors
///
/// Returns [`MarcError::Xml`] if the document cannot be parsed.
pub fn marcxml_to_records(xml: &str, config: &HoldingsConfig) -> Result<Vec<Result<Record>>> {
    Ok(marcxml_to_mnemonic(xml)?
        .iter()
        .map(|block| Record::from_mnemonic_with_config(block, config))
        .collect())
}
