//! Render linked 85x/86x fields into holdings statements.
//!
//! The converter replays a record's 853-855 and 863-865 fields in source
//! order. It has two states: while reading captions it adds definitions to
//! the [`CaptionTable`]; the first data field switches it to reading data.
//! A caption field that arrives after data starts a new run, and the table
//! is emptied first so the new run fully replaces the old definitions.
//!
//! Each data field becomes one [`HoldingsStatement`]:
//!
//! - enumeration levels (`a`-`f`) are joined with `:`, as in `v.21:no.3`
//! - secondary enumeration (`g`-`h`) follows as ` = ...`
//! - chronology (`i`-`m`) goes in parentheses, year first: `(1988:Mar 15)`
//! - a value with a dash opens and closes a range: `v.21-25` → `v.21-v.25`
//! - 864 text is prefixed `suppl `, 865 text `index `
//! - `$z` and `$x` become the public and nonpublic notes
//!
//! # Examples
//!
//! ```
//! use serial_holdings::holdings::HoldingsConverter;
//! use serial_holdings::{HoldingsConfig, Record};
//!
//! let record = Record::from_mnemonic(
//!     "=LDR  00000cy  a22000003  4500\n\
//!      =853  20$81$av.$bno.$i(year)$j(month)\n\
//!      =863  40$81.1$a21-25$b3-$i1988-1992$j03-",
//! )?;
//! let result = HoldingsConverter::new(&HoldingsConfig::default()).convert(&record);
//! assert_eq!(result.statements[0].text, "v.21:no.3 (1988:Mar)-v.25 (1992)");
//! assert!(result.warnings.is_empty());
//! # Ok::<(), serial_holdings::MarcError>(())
//! ```

use super::captions::{is_caption_code, CaptionGroup, CaptionTable};
use super::linkage::LinkKey;
use super::{display_prefix, indicators, ordinal};
use crate::config::HoldingsConfig;
use crate::normalize::{month_number, season_number, MONTH_ABBREVIATIONS, SEASON_NAMES};
use crate::record::{Field, Record};
use crate::warning::{FieldWarning, WarningKind};
use serde::{Deserialize, Serialize};

const HOLDINGS_TAGS: [&str; 6] = ["853", "854", "855", "863", "864", "865"];

/// Subfield codes defined for 853-855.
const CAPTION_SUBFIELDS: &str = "8abcdefghijklmnoptuvwxyz36";

/// Subfield codes defined for 863-865.
const DATA_SUBFIELDS: &str = "abcdefghijklmnopqstwxz68";

/// Season codes in chronology data run from 21 (spring) to 24 (winter).
const FIRST_SEASON_CODE: u8 = 21;

/// One rendered 86x occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingsStatement {
    /// Source tag (863, 864 or 865)
    pub tag: String,
    /// The `$8` key as written, or the sentinel link
    pub link: String,
    /// Display string, e.g. `v.5 (1990)`
    pub text: String,
    /// `$z` notes joined with `"; "`
    pub public_note: String,
    /// `$x` notes joined with `"; "`
    pub nonpublic_note: String,
}

/// Statements and warnings produced from one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// One statement per usable data field, in source order
    pub statements: Vec<HoldingsStatement>,
    /// Structural problems found along the way
    pub warnings: Vec<FieldWarning>,
}

impl ConversionResult {
    /// Display strings of every non-empty statement.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.statements
            .iter()
            .map(|s| s.text.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Whether the conversion produced no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadingCaptions,
    ReadingData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChronologySlot {
    Month,
    Season,
    Other,
}

impl ChronologySlot {
    fn of(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("month") {
            Self::Month
        } else if label.contains("season") {
            Self::Season
        } else {
            Self::Other
        }
    }
}

/// Levels of one side of a range.
#[derive(Debug, Default)]
struct Track {
    enumeration: Vec<String>,
    secondary: Vec<String>,
    chronology: Vec<String>,
}

impl Track {
    fn push(&mut self, code: char, text: String) {
        match code {
            'a'..='f' => self.enumeration.push(text),
            'g' | 'h' => self.secondary.push(text),
            _ => self.chronology.push(text),
        }
    }

    fn render(&self) -> String {
        let mut text = self.enumeration.join(":");
        if !self.secondary.is_empty() {
            let secondary = self.secondary.join(":");
            if text.is_empty() {
                text = secondary;
            } else {
                text = format!("{text} = {secondary}");
            }
        }
        let chronology = match self.chronology.split_first() {
            None => String::new(),
            Some((first, [])) => first.clone(),
            Some((first, rest)) => format!("{first}:{}", rest.join(" ")),
        };
        match (text.is_empty(), chronology.is_empty()) {
            (_, true) => text,
            (true, false) => chronology,
            (false, false) => format!("{text} ({chronology})"),
        }
    }
}

/// Split a value on its first dash. The second element is the close value
/// when a dash was present; the flag reports a second dash, after which the
/// close value is cut.
fn split_tracks(value: &str) -> (&str, Option<&str>, bool) {
    match value.split_once('-') {
        None => (value, None, false),
        Some((open, rest)) => match rest.split_once('-') {
            None => (open, Some(rest), false),
            Some((close, _)) => (open, Some(close), true),
        },
    }
}

/// Caption plus value, as it appears in the display string.
fn captioned(label: &str, value: &str) -> String {
    if label.starts_with('(') && label.ends_with(')') {
        return value.to_string();
    }
    if let Some(unit) = label.strip_prefix('+') {
        let unit = unit.trim();
        return if unit.is_empty() {
            ordinal(value)
        } else {
            format!("{} {unit}", ordinal(value))
        };
    }
    format!("{label}{value}")
}

fn joined_notes(field: &Field, code: char) -> String {
    field
        .subfields_by_code(code)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Converts the 85x/86x fields of a record into holdings statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldingsConverter {
    loose_rules: bool,
}

impl HoldingsConverter {
    /// Create a converter using the configuration's loose-rules setting.
    #[must_use]
    pub fn new(config: &HoldingsConfig) -> Self {
        HoldingsConverter {
            loose_rules: config.loose_rules,
        }
    }

    /// Accept season codes in month slots and month codes in season slots.
    #[must_use]
    pub const fn with_loose_rules(mut self, enabled: bool) -> Self {
        self.loose_rules = enabled;
        self
    }

    /// Convert every 863-865 field of the record.
    #[must_use]
    pub fn convert(&self, record: &Record) -> ConversionResult {
        let mut result = ConversionResult::default();
        let mut table = CaptionTable::default();
        let mut state = State::ReadingCaptions;

        for field in record.fields_in_source_order(&HOLDINGS_TAGS) {
            let line = field.to_mnemonic();
            let before = result.warnings.len();

            result.warnings.extend(indicators::validate(field));
            if let Some(group) = CaptionGroup::from_caption_tag(&field.tag) {
                check_subfields(field, CAPTION_SUBFIELDS, &mut result.warnings);
                if state == State::ReadingData {
                    tracing::debug!(tag = %field.tag, "new caption run, caption table reset");
                    table.clear();
                    state = State::ReadingCaptions;
                }
                read_captions(group, field, &mut table, &mut result.warnings);
            } else if let Some(group) = CaptionGroup::from_data_tag(&field.tag) {
                check_subfields(field, DATA_SUBFIELDS, &mut result.warnings);
                state = State::ReadingData;
                if let Some(statement) = self.render(group, field, &table, &mut result.warnings) {
                    result.statements.push(statement);
                }
            }

            for warning in &mut result.warnings[before..] {
                if warning.line.is_none() {
                    warning.line = Some(line.clone());
                }
            }
        }

        tracing::debug!(
            statements = result.statements.len(),
            warnings = result.warnings.len(),
            "converted holdings fields"
        );
        result
    }

    fn render(
        &self,
        group: CaptionGroup,
        field: &Field,
        table: &CaptionTable,
        warnings: &mut Vec<FieldWarning>,
    ) -> Option<HoldingsStatement> {
        let (key, link_warning) = LinkKey::from_subfield(&field.tag, field.get_subfield('8'));
        warnings.extend(link_warning);
        let link = key.link();

        let mut statement = HoldingsStatement {
            tag: field.tag.clone(),
            link: key.as_str().to_string(),
            text: String::new(),
            public_note: joined_notes(field, 'z'),
            nonpublic_note: joined_notes(field, 'x'),
        };

        if !table.has_link(group, link) {
            warnings.push(FieldWarning::new(
                WarningKind::UnknownCaptionLink,
                format!("field {}: no {group} captions for link {link}", field.tag),
            ));
            let has_notes = !statement.public_note.is_empty() || !statement.nonpublic_note.is_empty();
            return has_notes.then_some(statement);
        }

        let mut open = Track::default();
        let mut close = Track::default();
        let mut dashed = false;
        let mut closed = false;

        for sf in field.subfields.iter().filter(|sf| is_caption_code(sf.code)) {
            let Some(label) = table.get(group, link, sf.code) else {
                warnings.push(FieldWarning::new(
                    WarningKind::UncaptionedSubfield,
                    format!(
                        "field {}: ${} has no caption in {group} link {link}",
                        field.tag, sf.code
                    ),
                ));
                continue;
            };
            let value = sf.value.trim();
            if value.is_empty() {
                continue;
            }

            let (open_value, close_value, overflow) = split_tracks(value);
            if overflow {
                warnings.push(FieldWarning::new(
                    WarningKind::DashOverflow,
                    format!("field {}: ${} '{value}' has more than one '-'", field.tag, sf.code),
                ));
            }

            let open_text = self.level(label, open_value.trim(), warnings);
            match close_value.map(str::trim) {
                None => close.push(sf.code, open_text.clone()),
                Some("") => dashed = true,
                Some(close_value) => {
                    dashed = true;
                    closed = true;
                    close.push(sf.code, self.level(label, close_value, warnings));
                },
            }
            open.push(sf.code, open_text);
        }

        let mut text = open.render();
        if dashed {
            text.push('-');
            if closed {
                text.push_str(&close.render());
            }
        }
        if !text.is_empty() {
            text = display_prefix(&field.tag, &text);
        }
        statement.text = text;
        Some(statement)
    }

    /// Render one level value under its caption. Month and season slots turn
    /// their codes into names; slash-joined values convert part by part.
    fn level(&self, label: &str, value: &str, warnings: &mut Vec<FieldWarning>) -> String {
        let slot = ChronologySlot::of(label);
        let value = if slot == ChronologySlot::Other {
            value.to_string()
        } else {
            value
                .split('/')
                .map(|part| self.chronology_name(slot, part.trim(), warnings))
                .collect::<Vec<_>>()
                .join("/")
        };
        captioned(label, &value)
    }

    fn chronology_name(
        &self,
        slot: ChronologySlot,
        code: &str,
        warnings: &mut Vec<FieldWarning>,
    ) -> String {
        let month = |n: u8| MONTH_ABBREVIATIONS.get(usize::from(n).wrapping_sub(1)).copied();
        let season = |n: u8| {
            n.checked_sub(FIRST_SEASON_CODE)
                .and_then(|i| SEASON_NAMES.get(usize::from(i)).copied())
        };

        let name = match code.parse::<u8>() {
            Ok(n) => match slot {
                ChronologySlot::Month => {
                    month(n).or_else(|| season(n).filter(|_| self.loose_rules))
                },
                ChronologySlot::Season => {
                    season(n).or_else(|| month(n).filter(|_| self.loose_rules))
                },
                ChronologySlot::Other => None,
            },
            // Already written out as a word.
            Err(_) => match slot {
                ChronologySlot::Month => month_number(code).and_then(month),
                ChronologySlot::Season => season_number(code)
                    .and_then(|n| SEASON_NAMES.get(usize::from(n).wrapping_sub(1)).copied()),
                ChronologySlot::Other => None,
            },
        };

        if let Some(name) = name {
            return name.to_string();
        }
        let what = if slot == ChronologySlot::Month { "month" } else { "season" };
        warnings.push(FieldWarning::new(
            WarningKind::BadChronology,
            format!("'{code}' is not a {what} code"),
        ));
        code.to_string()
    }
}

fn read_captions(
    group: CaptionGroup,
    field: &Field,
    table: &mut CaptionTable,
    warnings: &mut Vec<FieldWarning>,
) {
    let (key, link_warning) = LinkKey::from_subfield(&field.tag, field.get_subfield('8'));
    warnings.extend(link_warning);
    for sf in field.subfields.iter().filter(|sf| is_caption_code(sf.code)) {
        if !sf.value.trim().is_empty() {
            table.insert(group, key.link(), sf.code, &sf.value);
        }
    }
}

/// Illegal codes for the tag, and repeats of a code that may occur once.
fn check_subfields(field: &Field, legal: &str, warnings: &mut Vec<FieldWarning>) {
    let mut seen: Vec<char> = Vec::new();
    for sf in &field.subfields {
        if !legal.contains(sf.code) {
            warnings.push(FieldWarning::new(
                WarningKind::IllegalSubfield,
                format!("field {}: ${} is not defined", field.tag, sf.code),
            ));
        }
        if is_caption_code(sf.code) || sf.code == '8' {
            if seen.contains(&sf.code) {
                warnings.push(FieldWarning::new(
                    WarningKind::DuplicateSubfield,
                    format!("field {}: ${} repeated", field.tag, sf.code),
                ));
            } else {
                seen.push(sf.code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEADER: &str = "=LDR  00000cy  a22000003  4500\n";

    fn convert(fields: &str) -> ConversionResult {
        convert_with(fields, false)
    }

    fn convert_with(fields: &str, loose: bool) -> ConversionResult {
        let record = Record::from_mnemonic(&format!("{LEADER}{fields}")).unwrap();
        HoldingsConverter::default()
            .with_loose_rules(loose)
            .convert(&record)
    }

    fn texts(result: &ConversionResult) -> Vec<&str> {
        result.texts().collect()
    }

    fn kinds(result: &ConversionResult) -> Vec<WarningKind> {
        result.warnings.iter().map(|w| w.kind).collect()
    }

    #[test]
    fn test_simple_caption_link() {
        let result = convert("=853  20$81$av.$i(year)\n=863  40$81.1$a5$i1990");
        assert_eq!(texts(&result), vec!["v.5 (1990)"]);
        assert!(result.is_clean());
        assert_eq!(result.statements[0].link, "1.1");
        assert_eq!(result.statements[0].tag, "863");
    }

    #[test]
    fn test_open_ended_range() {
        let result = convert("=853  20$81$av.$i(year)\n=863  40$81.1$a1-$i1990-");
        assert_eq!(texts(&result), vec!["v.1 (1990)-"]);
    }

    #[test]
    fn test_undashed_value_applies_to_both_sides() {
        let result = convert("=853  20$81$av.$i(year)\n=863  40$81.1$a5$i1990-1995");
        assert_eq!(texts(&result), vec!["v.5 (1990)-v.5 (1995)"]);
    }

    #[test]
    fn test_new_caption_run_resets_table() {
        let result = convert(
            "=853  20$81$av.$i(year)\n=863  40$81.1$a1$i1990\n\
             =853  20$82$ano.$i(year)\n=863  40$81.2$a2$i1991\n=863  40$82.1$a3$i1992",
        );
        assert_eq!(texts(&result), vec!["v.1 (1990)", "no.3 (1992)"]);
        assert_eq!(kinds(&result), vec![WarningKind::UnknownCaptionLink]);
        assert_eq!(
            result.warnings[0].line.as_deref(),
            Some("=863  40$81.2$a2$i1991")
        );
    }

    #[test]
    fn test_adjacent_caption_fields_share_a_run() {
        let result = convert(
            "=853  20$81$av.$i(year)\n=854  00$81$apt.$i(year)\n\
             =863  40$81.1$a1$i1990\n=864  40$81.1$a1$i1990",
        );
        assert_eq!(texts(&result), vec!["v.1 (1990)", "suppl pt.1 (1990)"]);
        assert!(result.is_clean());
    }

    #[test]
    fn test_missing_link_uses_sentinel() {
        let result = convert("=853  20$av.\n=863  40$a7");
        assert_eq!(texts(&result), vec!["v.7"]);
        assert_eq!(result.statements[0].link, "0");
        assert_eq!(
            kinds(&result),
            vec![WarningKind::MissingLink, WarningKind::MissingLink]
        );
    }

    #[test]
    fn test_uncaptioned_subfield_is_skipped() {
        let result = convert("=853  20$81$av.\n=863  40$81.1$a2$b4");
        assert_eq!(texts(&result), vec!["v.2"]);
        assert_eq!(kinds(&result), vec![WarningKind::UncaptionedSubfield]);
    }

    #[test]
    fn test_dash_overflow_uses_first_split() {
        let result = convert("=853  20$81$av.\n=863  40$81.1$a1-3-5");
        assert_eq!(texts(&result), vec!["v.1-v.3"]);
        assert_eq!(kinds(&result), vec![WarningKind::DashOverflow]);
    }

    #[test]
    fn test_season_codes() {
        let result = convert(
            "=853  20$81$av.$bno.$i(year)$j(season)\n=863  40$81.1$a1$b2$i1990$j21",
        );
        assert_eq!(texts(&result), vec!["v.1:no.2 (1990:Spring)"]);
    }

    #[test]
    fn test_season_code_in_month_slot() {
        let fields = "=853  20$81$av.$i(year)$j(month)\n=863  40$81.1$a1$i1990$j22";

        let strict = convert(fields);
        assert_eq!(texts(&strict), vec!["v.1 (1990:22)"]);
        assert_eq!(kinds(&strict), vec![WarningKind::BadChronology]);

        let loose = convert_with(fields, true);
        assert_eq!(texts(&loose), vec!["v.1 (1990:Summer)"]);
        assert!(loose.is_clean());
    }

    #[test]
    fn test_ordinal_hidden_and_secondary_captions() {
        let result = convert(
            "=853  20$81$a+ser.$bv.$g(issue)$i(year)\n=863  40$81.1$a2$b5$g101$i1990",
        );
        assert_eq!(texts(&result), vec!["2nd ser.:v.5 = 101 (1990)"]);
    }

    #[test]
    fn test_slash_chronology() {
        let result = convert(
            "=853  20$81$av.$i(year)$j(month)$k(day)\n=863  40$81.1$a3$i1999$j09/10$k18/24",
        );
        assert_eq!(texts(&result), vec!["v.3 (1999:Sep/Oct 18/24)"]);
    }

    #[test]
    fn test_index_prefix_and_notes() {
        let result = convert(
            "=855  \\\\$81$av.\n\
             =865  40$81.1$a1-10$zLibrary has index only$zshelved at Ref$xcheck",
        );
        let statement = &result.statements[0];
        assert_eq!(statement.text, "index v.1-v.10");
        assert_eq!(statement.public_note, "Library has index only; shelved at Ref");
        assert_eq!(statement.nonpublic_note, "check");
        assert!(result.is_clean());
    }

    #[test]
    fn test_supplement_prefix_not_doubled() {
        let result = convert("=854  00$81$aSuppl.\n=864  40$81.1$a3");
        assert_eq!(texts(&result), vec!["Suppl.3"]);
    }

    #[test]
    fn test_structural_warnings() {
        let result = convert("=853  99$81$av.$rfoo\n=863  40$81.1$a1$a2");
        assert_eq!(
            kinds(&result),
            vec![
                WarningKind::IllegalIndicator,
                WarningKind::IllegalIndicator,
                WarningKind::IllegalSubfield,
                WarningKind::DuplicateSubfield,
            ]
        );
        assert_eq!(texts(&result), vec!["v.1:v.2"]);
    }

    #[test]
    fn test_unknown_link_keeps_notes() {
        let result = convert("=863  40$81.1$a1$zmissing captions");
        assert_eq!(result.statements.len(), 1);
        assert_eq!(result.statements[0].text, "");
        assert_eq!(result.statements[0].public_note, "missing captions");
        assert_eq!(texts(&result), Vec::<&str>::new());
    }

    #[test]
    fn test_record_without_holdings() {
        let result = convert("=245  00$aNothing here");
        assert!(result.statements.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_split_tracks() {
        assert_eq!(split_tracks("5"), ("5", None, false));
        assert_eq!(split_tracks("1-5"), ("1", Some("5"), false));
        assert_eq!(split_tracks("1-"), ("1", Some(""), false));
        assert_eq!(split_tracks("1-3-5"), ("1", Some("3"), true));
    }
}
