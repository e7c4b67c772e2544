//! Integration tests for 85x/86x conversion and the per-record pipeline.

mod common;

use common::{create_realistic_serial, test_config, HOLDINGS_LEADER};
use serial_holdings::{
    holdings_years, holdings_years_parallel, HoldingsConfig, HoldingsConverter, Record,
    WarningKind,
};

fn holdings_record(fields: &str) -> Record {
    Record::from_mnemonic(&format!("{HOLDINGS_LEADER}\n{fields}")).unwrap()
}

#[test]
fn test_caption_link_resolution() {
    let record = holdings_record("=853  20$81$av.$i(year)\n=863  40$81.1$a5$i1990");
    let result = HoldingsConverter::default().convert(&record);
    assert_eq!(result.texts().collect::<Vec<_>>(), ["v.5 (1990)"]);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_month_range_statement() {
    let record = create_realistic_serial();
    let result = HoldingsConverter::new(&HoldingsConfig::default()).convert(&record);
    assert_eq!(
        result.texts().collect::<Vec<_>>(),
        ["v.1:no.1 (1985:Jan)-v.3:no.12 (1987:Dec)"]
    );
    assert!(result.is_clean());
}

#[test]
fn test_loose_rules_from_config() {
    let fields = "=853  20$81$av.$i(year)$j(season)\n=863  40$81.1$a1$i1990$j03";
    let record = holdings_record(fields);

    let strict = HoldingsConverter::new(&HoldingsConfig::default()).convert(&record);
    assert_eq!(strict.warnings[0].kind, WarningKind::BadChronology);

    let loose_config = HoldingsConfig::new().with_loose_rules(true);
    let loose = HoldingsConverter::new(&loose_config).convert(&record);
    assert!(loose.is_clean());
    assert_eq!(loose.texts().collect::<Vec<_>>(), ["v.1 (1990:Mar)"]);
}

#[test]
fn test_warnings_carry_source_line() {
    let record = holdings_record("=853  20$81$av.\n=863  40$a7");
    let result = HoldingsConverter::default().convert(&record);
    let missing: Vec<_> = result
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::MissingLink)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].line.as_deref(), Some("=863  40$a7"));
}

#[test]
fn test_statements_serialize_for_reports() {
    let record = holdings_record(
        "=853  20$81$av.$i(year)\n=863  40$81.1$a5$i1990$zgaps$xbindery",
    );
    let result = HoldingsConverter::default().convert(&record);
    let json = serde_json::to_value(&result.statements[0]).unwrap();
    assert_eq!(json["text"], "v.5 (1990)");
    assert_eq!(json["public_note"], "gaps");
    assert_eq!(json["nonpublic_note"], "bindery");
    assert_eq!(json["link"], "1.1");
}

#[test]
fn test_full_pipeline_for_realistic_serial() {
    let record = create_realistic_serial();
    let summary = holdings_years(&record, &test_config());
    assert_eq!(summary.statements.len(), 3);
    assert_eq!(summary.years.first(), Some(&1985));
    assert_eq!(summary.years.last(), Some(&1991));
    assert!(!summary.years.contains(&1988));
    assert_eq!(summary.within_publication_dates, Some(true));
    assert!(summary.warnings.is_empty());
}

#[test]
fn test_supplement_years_counted() {
    let record = holdings_record(
        "=854  20$81$apt.$i(year)\n=864  40$81.1$a1-3$i1995-1997\n=867  40$80$a1998-1999",
    );
    let summary = holdings_years(&record, &test_config());
    assert_eq!(
        summary.statements,
        ["suppl pt.1 (1995)-pt.3 (1997)", "suppl 1998-1999"]
    );
    assert_eq!(summary.years, (1995..=1999).collect::<Vec<_>>());
    assert_eq!(summary.summary, "1995-1999");
}

#[test]
fn test_parallel_pipeline_preserves_order() {
    let records: Vec<Record> = (0..8)
        .map(|i| {
            holdings_record(&format!(
                "=853  20$81$av.$i(year)\n=863  40$81.1$a{}$i{}",
                i + 1,
                2000 + i
            ))
        })
        .collect();
    let results = holdings_years_parallel(&records, &test_config());
    let firsts: Vec<i32> = results.iter().map(|r| r.years[0]).collect();
    assert_eq!(firsts, (2000..2008).collect::<Vec<_>>());
}
