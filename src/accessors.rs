//! The fixed table of values derived from a record.
//!
//! Each [`Accessor`] names one value a downstream check can ask for: the
//! resolved OCLC number, ISSN variants, title, fixed-field dates and so on.
//! [`crate::Record::value`] computes a value on first use and caches it; the
//! typed shorthands (`record.oclc()`, `record.issn()`, ...) forward to it.
//!
//! Names can be resolved from configuration with [`str::parse`]; an unknown
//! name is a [`MarcError::UnknownAccessor`], never a silent empty value.
//!
//! # Examples
//!
//! ```
//! use serial_holdings::{Accessor, Record};
//!
//! let record = Record::from_mnemonic(
//!     "=LDR  00000cas a2200000 a 4500\n=022  0\\$a0028-0836$l0028-0836",
//! )?;
//! let accessor: Accessor = "issn_l".parse()?;
//! assert_eq!(record.value(accessor).as_list(), ["0028-0836"]);
//! assert!("shelf_mark".parse::<Accessor>().is_err());
//! # Ok::<(), serial_holdings::MarcError>(())
//! ```

use crate::config::RecordSource;
use crate::error::MarcError;
use crate::fixed_fields::{carrier, layout, slice};
use crate::holdings::display_prefix;
use crate::identifiers::{clean_oclc_number, format_issn, normalize_lccn};
use crate::record::{Field, Record};
use crate::{list_accessors, text_accessors};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named value derived from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessor {
    /// Resolved OCLC number
    Oclc,
    /// Other OCLC numbers the record answers to (019, 035)
    AlternateOclc,
    /// 022 $a
    Issn,
    /// 022 $l (linking ISSN)
    IssnL,
    /// 022 $m (canceled ISSN-L)
    IssnM,
    /// 022 $y (incorrect ISSN)
    IssnY,
    /// 022 $z (canceled ISSN)
    IssnZ,
    /// 010 $a
    Lccn,
    /// 245 title proper with subtitle and part
    Title,
    /// 260/264 publisher
    Publisher,
    /// 1XX main entry
    MainEntry,
    /// Leader/06
    RecordType,
    /// Leader/07
    BibLevel,
    /// Carrier from 008 form of item or 007
    Form,
    /// 008/35-37
    Language,
    /// 008/15-17
    Place,
    /// 008/06
    DateType,
    /// 008/07-10
    Date1,
    /// 008/11-14
    Date2,
    /// 008/18, continuing resources only
    Frequency,
    /// 008/19, continuing resources only
    Regularity,
    /// 362 $a
    PublicationDates,
    /// 866/867/868 $a
    TextualHoldings,
}

impl Accessor {
    /// Number of accessors in the table.
    pub const COUNT: usize = 23;

    /// Every accessor, in table order.
    pub const ALL: [Accessor; Self::COUNT] = [
        Self::Oclc,
        Self::AlternateOclc,
        Self::Issn,
        Self::IssnL,
        Self::IssnM,
        Self::IssnY,
        Self::IssnZ,
        Self::Lccn,
        Self::Title,
        Self::Publisher,
        Self::MainEntry,
        Self::RecordType,
        Self::BibLevel,
        Self::Form,
        Self::Language,
        Self::Place,
        Self::DateType,
        Self::Date1,
        Self::Date2,
        Self::Frequency,
        Self::Regularity,
        Self::PublicationDates,
        Self::TextualHoldings,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Oclc => "oclc",
            Self::AlternateOclc => "alternate_oclc",
            Self::Issn => "issn",
            Self::IssnL => "issn_l",
            Self::IssnM => "issn_m",
            Self::IssnY => "issn_y",
            Self::IssnZ => "issn_z",
            Self::Lccn => "lccn",
            Self::Title => "title",
            Self::Publisher => "publisher",
            Self::MainEntry => "main_entry",
            Self::RecordType => "record_type",
            Self::BibLevel => "bib_level",
            Self::Form => "form",
            Self::Language => "language",
            Self::Place => "place",
            Self::DateType => "date_type",
            Self::Date1 => "date1",
            Self::Date2 => "date2",
            Self::Frequency => "frequency",
            Self::Regularity => "regularity",
            Self::PublicationDates => "publication_dates",
            Self::TextualHoldings => "textual_holdings",
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Accessor {
    type Err = MarcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| MarcError::UnknownAccessor(s.to_string()))
    }
}

/// A derived value: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccessorValue {
    /// Single value; empty when absent
    Text(String),
    /// Repeatable value; empty when absent
    List(Vec<String>),
}

impl AccessorValue {
    /// The value as text. A list yields its first element.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::List(v) => v.first().map_or("", String::as_str),
        }
    }

    /// The value as a list. Non-empty text yields a one-element slice.
    #[must_use]
    pub fn as_list(&self) -> &[String] {
        match self {
            Self::Text(s) if s.is_empty() => &[],
            Self::Text(s) => std::slice::from_ref(s),
            Self::List(v) => v,
        }
    }

    /// Whether the value is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(v) => v.is_empty(),
        }
    }
}

impl Record {
    text_accessors! {
        oclc => Oclc,
        lccn => Lccn,
        title => Title,
        publisher => Publisher,
        main_entry => MainEntry,
        record_type => RecordType,
        bib_level => BibLevel,
        form => Form,
        language => Language,
        place => Place,
        date_type => DateType,
        date1 => Date1,
        date2 => Date2,
        frequency => Frequency,
        regularity => Regularity,
    }

    list_accessors! {
        alternate_oclc => AlternateOclc,
        issn => Issn,
        issn_l => IssnL,
        issn_m => IssnM,
        issn_y => IssnY,
        issn_z => IssnZ,
        publication_dates => PublicationDates,
        textual_holdings => TextualHoldings,
    }
}

lazy_static! {
    static ref OCLC_CONTROL_NUMBER: Regex =
        Regex::new(r"^\s*(?:ocm|ocn|on)?\d+\s*$").expect("valid regex");
    static ref OCLC_XREF: Regex = Regex::new(r"(?i)^\s*\(\s*ocolc\s*\)").expect("valid regex");
}

const TRAILING_PUNCTUATION: &[char] = &[' ', '/', ':', ';', '=', ',', '.'];

fn strip_trailing(value: &str) -> String {
    value.trim().trim_end_matches(TRAILING_PUNCTUATION).to_string()
}

pub(crate) fn compute(record: &Record, accessor: Accessor) -> AccessorValue {
    use AccessorValue::{List, Text};

    let fixed = record.get_control_field("008");
    let material = record.leader().material();
    let fixed_slice = |start, len| fixed.map(|f| slice(f, start, len)).unwrap_or_default();
    let layout_slice = |offset: Option<usize>| offset.map(|o| fixed_slice(o, 1)).unwrap_or_default();

    match accessor {
        Accessor::Oclc => Text(resolve_oclc(record)),
        Accessor::AlternateOclc => List(alternate_oclc(record)),
        Accessor::Issn => List(issns(record, 'a')),
        Accessor::IssnL => List(issns(record, 'l')),
        Accessor::IssnM => List(issns(record, 'm')),
        Accessor::IssnY => List(issns(record, 'y')),
        Accessor::IssnZ => List(issns(record, 'z')),
        Accessor::Lccn => Text(
            record
                .get_field("010")
                .and_then(|f| f.get_subfield('a'))
                .map(normalize_lccn)
                .unwrap_or_default(),
        ),
        Accessor::Title => Text(record.get_field("245").map(title).unwrap_or_default()),
        Accessor::Publisher => Text(publisher(record)),
        Accessor::MainEntry => Text(main_entry(record)),
        Accessor::RecordType => Text(record.leader().record_type().to_string().trim().to_string()),
        Accessor::BibLevel => Text(
            record
                .leader()
                .bibliographic_level()
                .to_string()
                .trim()
                .to_string(),
        ),
        Accessor::Form => Text(carrier(fixed, material, record.get_control_fields("007"))),
        Accessor::Language => Text(fixed_slice(35, 3)),
        Accessor::Place => Text(fixed_slice(15, 3)),
        Accessor::DateType => Text(fixed_slice(6, 1)),
        Accessor::Date1 => Text(fixed_slice(7, 4)),
        Accessor::Date2 => Text(fixed_slice(11, 4)),
        Accessor::Frequency => Text(layout_slice(layout(material).frequency)),
        Accessor::Regularity => Text(layout_slice(layout(material).regularity)),
        Accessor::PublicationDates => List(
            record
                .fields_by_tag("362")
                .flat_map(|f| f.subfields_by_code('a'))
                .map(strip_trailing)
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Accessor::TextualHoldings => List(textual_holdings(record)),
    }
}

/// First match wins; WorldCat records trust the 001 outright.
fn resolve_oclc(record: &Record) -> String {
    let control = record.get_control_field("001").unwrap_or("");
    let provenance = record.provenance();
    if provenance.source == RecordSource::WorldCat {
        return clean_oclc_number(control);
    }

    if let Some(local) = &provenance.local_oclc_field {
        let found = record
            .fields_by_tag(&local.tag)
            .flat_map(|f| f.subfields_by_code(local.code))
            .map(clean_oclc_number)
            .find(|n| !n.is_empty());
        if let Some(number) = found {
            return number;
        }
    }

    let oclc_origin = record
        .get_control_field("003")
        .is_some_and(|v| v.to_ascii_lowercase().contains("ocolc"));
    if oclc_origin {
        let number = clean_oclc_number(control);
        if !number.is_empty() {
            return number;
        }
    }

    let xref = record
        .fields_by_tag("035")
        .flat_map(|f| f.subfields_by_code('a'))
        .filter(|v| OCLC_XREF.is_match(v))
        .map(clean_oclc_number)
        .find(|n| !n.is_empty());
    if let Some(number) = xref {
        return number;
    }

    if OCLC_CONTROL_NUMBER.is_match(control) {
        return clean_oclc_number(control);
    }
    String::new()
}

fn alternate_oclc(record: &Record) -> Vec<String> {
    let primary = record.oclc().to_string();
    let from_019 = record
        .fields_by_tag("019")
        .flat_map(|f| f.subfields_by_code('a'));
    let from_035 = record
        .fields_by_tag("035")
        .flat_map(|f| f.subfields.iter())
        .filter(|sf| matches!(sf.code, 'a' | 'z') && OCLC_XREF.is_match(&sf.value))
        .map(|sf| sf.value.as_str());

    let mut numbers: Vec<String> = Vec::new();
    for number in from_019.chain(from_035).map(clean_oclc_number) {
        if !number.is_empty() && number != primary && !numbers.contains(&number) {
            numbers.push(number);
        }
    }
    numbers
}

fn issns(record: &Record, code: char) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for issn in record
        .fields_by_tag("022")
        .flat_map(|f| f.subfields_by_code(code))
        .map(format_issn)
    {
        if !issn.is_empty() && !found.contains(&issn) {
            found.push(issn);
        }
    }
    found
}

fn title(field: &Field) -> String {
    let mut out = String::new();
    for sf in &field.subfields {
        if !matches!(sf.code, 'a' | 'b' | 'n' | 'p') {
            continue;
        }
        let value = strip_trailing(&sf.value);
        if value.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(match sf.code {
                'b' => ": ",
                'n' | 'p' => ". ",
                _ => " ",
            });
        }
        out.push_str(&value);
    }
    strip_trailing(&out)
}

fn publisher(record: &Record) -> String {
    let from_260 = record.get_field("260");
    let from_264 = record
        .fields_by_tag("264")
        .find(|f| f.indicator2 == '1');
    from_260
        .or(from_264)
        .map(|f| {
            f.subfields_by_code('b')
                .map(strip_trailing)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("; ")
        })
        .unwrap_or_default()
}

fn main_entry(record: &Record) -> String {
    const MAIN_ENTRIES: [(&str, &[char]); 4] = [
        ("100", &['a', 'b', 'c', 'd', 'q']),
        ("110", &['a', 'b']),
        ("111", &['a', 'n', 'd', 'c']),
        ("130", &['a', 'n', 'p']),
    ];
    for (tag, codes) in MAIN_ENTRIES {
        if let Some(field) = record.get_field(tag) {
            let parts: Vec<String> = field
                .subfields
                .iter()
                .filter(|sf| codes.contains(&sf.code))
                .map(|sf| strip_trailing(&sf.value))
                .filter(|s| !s.is_empty())
                .collect();
            return parts.join(" ");
        }
    }
    String::new()
}

fn textual_holdings(record: &Record) -> Vec<String> {
    record
        .fields_in_source_order(&["866", "867", "868"])
        .into_iter()
        .flat_map(|f| {
            f.subfields_by_code('a')
                .map(|value| display_prefix(&f.tag, value.trim()))
                .collect::<Vec<_>>()
        })
        .filter(|s| !s.trim().is_empty())
        .collect()
}
