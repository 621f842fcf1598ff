// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use financeflow::aggregate::monthly_series;
use financeflow::models::{CategoryRef, Transaction, TxType};
use financeflow::report::{
    build_report, render_json, render_text, report_file_name, write_report, ReportFormat,
};
use tempfile::tempdir;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn tx(id: &str, kind: TxType, amount: &str, d: &str, cat: Option<&str>, desc: Option<&str>) -> Transaction {
    Transaction {
        id: id.into(),
        user_id: "u1".into(),
        category_id: cat.map(|_| format!("cat-{}", id)),
        kind,
        amount: amount.parse().unwrap(),
        description: desc.map(str::to_string),
        date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
        created_at: None,
        updated_at: None,
        categories: cat.map(|name| CategoryRef {
            name: name.into(),
            icon: None,
            color: None,
        }),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("1", TxType::Expense, "150", "2024-02-05", Some("Food"), None),
        tx("2", TxType::Expense, "300", "2024-01-20", None, Some("Rent")),
        tx("3", TxType::Income, "1000", "2024-01-15", Some("Salary"), Some("January pay")),
    ]
}

#[test]
fn file_name_uses_generation_date() {
    assert_eq!(
        report_file_name(at("2024-03-15 23:59:00")),
        "financeflow-report-2024-03-15"
    );
}

#[test]
fn report_sections_and_row_order() {
    let rows = sample();
    let now = at("2024-03-15 10:30:00");
    let series = monthly_series(&rows, 3, now.date());
    let report = build_report(&rows, &series, now);

    assert_eq!(report.title, "FinanceFlow Report");
    assert_eq!(report.generated_on, "March 15, 2024");
    let summary: Vec<(&str, &str)> = report
        .summary
        .iter()
        .map(|l| (l.label, l.value.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Total Income", "$1,000.00"),
            ("Total Expenses", "$450.00"),
            ("Net Balance", "$550.00"),
        ]
    );

    assert_eq!(report.monthly.len(), 3);
    assert_eq!(report.monthly[0].month, "Jan 24");
    assert_eq!(report.monthly[0].net, "$700.00");
    assert_eq!(report.monthly[1].expense, "$150.00");
    assert_eq!(report.monthly[1].net, "-$150.00");

    // input order, placeholders for missing fields
    assert_eq!(report.transactions.len(), rows.len());
    let ids: Vec<&str> = report.transactions.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(ids, vec!["2024-02-05", "2024-01-20", "2024-01-15"]);
    assert_eq!(report.transactions[0].category, "Food");
    assert_eq!(report.transactions[0].description, "-");
    assert_eq!(report.transactions[1].category, "-");
    assert_eq!(report.transactions[1].description, "Rent");
    assert_eq!(report.transactions[2].kind, "income");
    assert_eq!(report.transactions[2].amount, "$1,000.00");
}

#[test]
fn empty_report_has_zero_summary() {
    let now = at("2024-03-15 10:30:00");
    let series = monthly_series(&[], 6, now.date());
    let report = build_report(&[], &series, now);
    assert!(report.transactions.is_empty());
    assert_eq!(report.monthly.len(), 6);
    assert!(report.summary.iter().all(|l| l.value == "$0.00"));

    let text = render_text(&report, 40);
    assert!(text.contains("Page 1 of 1"));
    assert!(!text.contains('\u{0c}'));
}

#[test]
fn text_render_paginates_transactions() {
    let rows: Vec<Transaction> = (0..5)
        .map(|i| tx(&i.to_string(), TxType::Expense, "1.50", "2024-03-01", None, None))
        .collect();
    let now = at("2024-03-15 10:30:00");
    let report = build_report(&rows, &monthly_series(&rows, 6, now.date()), now);
    let text = render_text(&report, 2);
    assert_eq!(text.matches('\u{0c}').count(), 2);
    assert!(text.contains("Page 3 of 3"));
    assert!(text.starts_with("FinanceFlow Report\nGenerated on March 15, 2024\n"));
    assert!(text.contains("Total Expenses: $7.50"));
}

#[test]
fn text_render_lays_out_sections_line_by_line() {
    let rows: Vec<Transaction> = (0..3)
        .map(|i| tx(&i.to_string(), TxType::Income, "10", "2024-03-01", None, None))
        .collect();
    let now = at("2024-03-15 10:30:00");
    let report = build_report(&rows, &monthly_series(&rows, 6, now.date()), now);
    let text = render_text(&report, 2);

    let head: Vec<&str> = text.lines().take(8).collect();
    assert_eq!(
        head,
        vec![
            "FinanceFlow Report",
            "Generated on March 15, 2024",
            "",
            "Summary",
            "  Total Income: $30.00",
            "  Total Expenses: $0.00",
            "  Net Balance: $30.00",
            "",
        ]
    );
    assert_eq!(text.lines().nth(8), Some("Monthly Breakdown"));
    assert!(text.contains("Page 1 of 2\n\u{0c}FinanceFlow Report (continued)\n\nTransactions\n"));
    assert!(text.ends_with("Page 2 of 2\n"));
}

#[test]
fn json_render_keeps_structure() {
    let rows = sample();
    let now = at("2024-03-15 10:30:00");
    let report = build_report(&rows, &monthly_series(&rows, 6, now.date()), now);
    let v: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
    assert_eq!(v["title"], "FinanceFlow Report");
    assert_eq!(v["file_stem"], "financeflow-report-2024-03-15");
    assert_eq!(v["monthly"].as_array().unwrap().len(), 6);
    assert_eq!(v["transactions"].as_array().unwrap().len(), 3);
    assert_eq!(v["transactions"][1]["type"], "expense");
}

#[test]
fn write_report_names_file_by_format() {
    let dir = tempdir().unwrap();
    let rows = sample();
    let now = at("2024-03-15 10:30:00");
    let report = build_report(&rows, &monthly_series(&rows, 6, now.date()), now);

    let txt = write_report(&report, ReportFormat::Text, dir.path(), 40).unwrap();
    assert_eq!(txt.file_name().unwrap(), "financeflow-report-2024-03-15.txt");
    assert!(std::fs::read_to_string(&txt).unwrap().contains("Monthly Breakdown"));

    let json = write_report(&report, ReportFormat::Json, dir.path(), 40).unwrap();
    assert_eq!(json.file_name().unwrap(), "financeflow-report-2024-03-15.json");
}

#[test]
fn report_format_parsing() {
    assert_eq!("TEXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
    assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
    assert!("pdf".parse::<ReportFormat>().is_err());
}
