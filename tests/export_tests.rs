mod common;

use bucket_budget::core::{BudgetSession, Clock, FixedClock};
use bucket_budget::domain::{Bucket, Frequency};
use bucket_budget::export::{ExportFormat, JsonStatement, ReportExporter, TextStatement};
use chrono::{TimeZone, Utc};
use common::draft;
use insta::assert_snapshot;
use regex::Regex;
use rust_decimal_macros::dec;

fn closing_session() -> BudgetSession {
    let mut session = BudgetSession::in_memory();
    session.set_income(dec!(2000)).unwrap();
    session.set_carryover(dec!(250)).unwrap();
    session
        .record(draft("Rent", Bucket::Essential, dec!(1200), Frequency::Fortnightly))
        .unwrap();
    session
        .record(draft("Groceries", Bucket::Essential, dec!(150), Frequency::Weekly))
        .unwrap();
    session
}

#[test]
fn text_statement_layout() {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 8, 14, 18, 30, 0).unwrap());
    let fields = closing_session().summary().statement_fields(clock.now());
    let bytes = TextStatement::new("$").export(&fields).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert_snapshot!(text.trim_end(), @r###"
    FINANCIAL AUDIT STATEMENT
    Generated: 2024-08-14

    Total Income/Carry: $2,250.00
    Total Expenses: $1,500.00
    Net Balance: $750.00
    "###);
}

#[test]
fn overspent_balance_is_negative() {
    let mut session = closing_session();
    session
        .record(draft("Car repair", Bucket::Temporary, dec!(1000), Frequency::Fortnightly))
        .unwrap();
    let fields = session.summary().statement_fields(Utc::now());
    let text = String::from_utf8(TextStatement::default().export(&fields).unwrap()).unwrap();

    assert!(text.contains("Net Balance: -$250.00"), "{}", text);
    let generated = Regex::new(r"(?m)^Generated: \d{4}-\d{2}-\d{2}$").unwrap();
    assert!(generated.is_match(&text));
}

#[test]
fn json_statement_carries_plain_fields() {
    let generated_at = Utc.with_ymd_and_hms(2024, 8, 14, 0, 0, 0).unwrap();
    let fields = closing_session().summary().statement_fields(generated_at);
    let bytes = JsonStatement.export(&fields).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["total_pool"], "2250");
    assert_eq!(value["total_spent"], "1500");
    assert_eq!(value["leftover"], "750");
    assert_eq!(value["generated_at"], "2024-08-14T00:00:00Z");
}

#[test]
fn format_names_resolve_to_exporters() {
    assert_eq!("text".parse::<ExportFormat>().unwrap().exporter("$").extension(), "txt");
    assert_eq!("json".parse::<ExportFormat>().unwrap().exporter("$").extension(), "json");
}
