//! Parser for MARC mnemonic text (the `=TAG  ind$a...` line format).
//!
//! One record is a block of lines:
//!
//! ```text
//! =LDR  00000cas a2200000 a 4500
//! =001  ocm12345678
//! =245  00$aJournal of things.
//! =853  20$81$av.$i(year)
//! ```
//!
//! Each line is `=`, a three-character tag, two spaces, then either the
//! control field value or two indicators followed by `$`-delimited subfields.
//! `\` stands for a blank in indicators and fixed fields, and `{dollar}` for a
//! literal `$` inside subfield text.
//!
//! Only a missing leader is fatal. Every other defect is recorded as a
//! [`FieldWarning`] and the offending token is skipped or truncated.

use crate::config::HoldingsConfig;
use crate::error::{MarcError, Result};
use crate::leader::Leader;
use crate::record::{Field, Provenance, Record, Subfield};
use crate::warning::{FieldWarning, WarningKind};
use indexmap::IndexMap;

const SUBFIELD_DELIMITER: char = '$';
const DOLLAR_ESCAPE: &str = "{dollar}";

/// Parse a single mnemonic record.
///
/// # Errors
///
/// Returns [`MarcError::MissingLeader`] when no `=LDR` line is present.
pub fn parse_record(text: &str, config: &HoldingsConfig) -> Result<Record> {
    let mut leader: Option<Leader> = None;
    let mut warnings = Vec::new();
    let mut control_fields: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut fields: IndexMap<String, Vec<Field>> = IndexMap::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let Some(rest) = line.strip_prefix('=') else {
            warnings.push(
                FieldWarning::new(WarningKind::UnrecognizedLine, "line does not start with '='")
                    .with_line(line),
            );
            continue;
        };
        let (tag, content) = split_tag(rest);

        if tag.eq_ignore_ascii_case("LDR") {
            if leader.is_some() {
                warnings.push(
                    FieldWarning::new(WarningKind::DuplicateField, "second leader ignored")
                        .with_line(line),
                );
                continue;
            }
            let (parsed, warning) = Leader::from_mnemonic(content);
            warnings.extend(warning.map(|w| w.with_line(line)));
            leader = Some(parsed);
            continue;
        }

        if tag.chars().count() != 3 || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            warnings.push(
                FieldWarning::new(WarningKind::IllegalTag, format!("illegal field tag '{tag}'"))
                    .with_line(line),
            );
            continue;
        }

        if tag.starts_with("00") {
            let values = control_fields.entry(tag.to_string()).or_default();
            if tag == "001" && !values.is_empty() {
                warnings.push(
                    FieldWarning::new(WarningKind::DuplicateField, "second 001 ignored")
                        .with_line(line),
                );
                continue;
            }
            values.push(content.replace('\\', " "));
            continue;
        }

        let field = parse_data_field(tag, content, index + 1, line, &mut warnings);
        fields.entry(field.tag.clone()).or_default().push(field);
    }

    let Some(leader) = leader else {
        return Err(MarcError::MissingLeader(
            "no =LDR line found in record text".to_string(),
        ));
    };

    tracing::debug!(
        fields = fields.len(),
        warnings = warnings.len(),
        "parsed mnemonic record"
    );

    Ok(Record::from_parts(
        leader,
        control_fields,
        fields,
        warnings,
        Provenance::from(config),
    ))
}

/// Split `TAG  content` into the tag and the content after the two-space
/// separator. A missing or short separator is tolerated.
fn split_tag(rest: &str) -> (&str, &str) {
    let split_at = rest
        .char_indices()
        .nth(3)
        .map_or(rest.len(), |(i, _)| i);
    let (tag, content) = rest.split_at(split_at);
    let content = content
        .strip_prefix("  ")
        .or_else(|| content.strip_prefix(' '))
        .unwrap_or(content);
    (tag.trim(), content)
}

fn blank(c: char) -> char {
    if c == '\\' {
        ' '
    } else {
        c
    }
}

fn parse_data_field(
    tag: &str,
    content: &str,
    line_number: usize,
    line: &str,
    warnings: &mut Vec<FieldWarning>,
) -> Field {
    let mut field = Field::new(tag.to_string(), ' ', ' ');
    field.line = line_number;

    // Indicators are the characters before the first delimiter, at most two.
    let delimiter_at = content.find(SUBFIELD_DELIMITER);
    let head = &content[..delimiter_at.unwrap_or(content.len())];
    let mut head_chars = head.chars();
    let indicators: Vec<char> = head_chars.by_ref().take(2).collect();
    let leftover: String = head_chars.collect();

    if indicators.len() < 2 {
        warnings.push(
            FieldWarning::new(
                WarningKind::MissingIndicators,
                format!("field {tag} has {} indicator(s), blanks assumed", indicators.len()),
            )
            .with_line(line),
        );
    }
    if let Some(&c) = indicators.first() {
        field.indicator1 = blank(c);
    }
    if let Some(&c) = indicators.get(1) {
        field.indicator2 = blank(c);
    }

    if !leftover.is_empty() {
        warnings.push(
            FieldWarning::new(
                WarningKind::MissingSubfieldDelimiter,
                format!("field {tag}: text '{leftover}' before first '$' dropped"),
            )
            .with_line(line),
        );
    }

    let Some(start) = delimiter_at else {
        return field;
    };

    for piece in content[start + 1..].split(SUBFIELD_DELIMITER) {
        let mut chars = piece.chars();
        let Some(code) = chars.next() else {
            warnings.push(
                FieldWarning::new(
                    WarningKind::DanglingSubfield,
                    format!("field {tag}: '$' without a subfield code"),
                )
                .with_line(line),
            );
            continue;
        };
        let value = chars.as_str().replace(DOLLAR_ESCAPE, "$");
        if value.trim().is_empty() {
            warnings.push(
                FieldWarning::new(
                    WarningKind::BlankSubfield,
                    format!("field {tag}: subfield ${code} is blank"),
                )
                .with_line(line),
            );
        }
        field.subfields.push(Subfield { code, value });
    }

    field
}
