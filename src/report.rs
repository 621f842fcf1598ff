// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Printable report: summary, monthly breakdown and the transaction list.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::aggregate::{totals, MonthPoint, Totals};
use crate::models::Transaction;
use crate::utils::{fmt_currency, pretty_table};

pub const TITLE: &str = "FinanceFlow Report";
const PLACEHOLDER: &str = "-";
const PAGE_BREAK: char = '\u{0c}';

#[derive(Debug, Clone, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRow {
    pub month: String,
    pub income: String,
    pub expense: String,
    pub net: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: &'static str,
    pub generated_on: String,
    pub file_stem: String,
    #[serde(skip)]
    pub totals: Totals,
    pub summary: Vec<SummaryLine>,
    pub monthly: Vec<MonthRow>,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(anyhow::anyhow!("Unknown report format: {} (use text|json)", other)),
        }
    }
}

/// `financeflow-report-YYYY-MM-DD`, from the generation date.
pub fn report_file_name(generated_at: NaiveDateTime) -> String {
    format!("financeflow-report-{}", generated_at.format("%Y-%m-%d"))
}

pub fn build_report(
    transactions: &[Transaction],
    monthly: &[MonthPoint],
    generated_at: NaiveDateTime,
) -> Report {
    let t = totals(transactions);
    let summary = vec![
        SummaryLine {
            label: "Total Income",
            value: fmt_currency(&t.total_income),
        },
        SummaryLine {
            label: "Total Expenses",
            value: fmt_currency(&t.total_expense),
        },
        SummaryLine {
            label: "Net Balance",
            value: fmt_currency(&t.balance),
        },
    ];
    let monthly = monthly
        .iter()
        .map(|m| MonthRow {
            month: m.label.clone(),
            income: fmt_currency(&m.income),
            expense: fmt_currency(&m.expense),
            net: fmt_currency(&m.net),
        })
        .collect();
    let transactions = transactions.iter().map(transaction_row).collect();

    Report {
        title: TITLE,
        generated_on: generated_at.format("%B %-d, %Y").to_string(),
        file_stem: report_file_name(generated_at),
        totals: t,
        summary,
        monthly,
        transactions,
    }
}

fn transaction_row(t: &Transaction) -> TransactionRow {
    let category = t
        .categories
        .as_ref()
        .map(|c| c.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(PLACEHOLDER);
    let description = t
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(PLACEHOLDER);
    TransactionRow {
        date: t.date.format("%Y-%m-%d").to_string(),
        kind: t.kind.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        amount: fmt_currency(&t.amount),
    }
}

/// Plain-text rendering. The transaction table is split into pages of at
/// most `rows_per_page` rows, separated by form feeds.
pub fn render_text(report: &Report, rows_per_page: usize) -> String {
    let rows_per_page = rows_per_page.max(1);
    let chunks: Vec<&[TransactionRow]> = if report.transactions.is_empty() {
        vec![&report.transactions[..]]
    } else {
        report.transactions.chunks(rows_per_page).collect()
    };
    let pages = chunks.len();

    let mut out = String::new();
    out.push_str(&format!("{}\n", report.title));
    out.push_str(&format!("Generated on {}\n", report.generated_on));
    out.push('\n');
    out.push_str("Summary\n");
    for line in &report.summary {
        out.push_str(&format!("  {}: {}\n", line.label, line.value));
    }
    out.push('\n');
    out.push_str("Monthly Breakdown\n");
    let monthly_rows = report
        .monthly
        .iter()
        .map(|m| vec![m.month.clone(), m.income.clone(), m.expense.clone(), m.net.clone()])
        .collect();
    out.push_str(&format!(
        "{}\n",
        pretty_table(&["Month", "Income", "Expenses", "Net"], monthly_rows)
    ));

    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            out.push(PAGE_BREAK);
            out.push_str(&format!("{} (continued)\n", report.title));
        }
        out.push('\n');
        out.push_str("Transactions\n");
        let rows = chunk
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        out.push_str(&format!(
            "{}\n",
            pretty_table(&["Date", "Type", "Category", "Description", "Amount"], rows)
        ));
        out.push_str(&format!("Page {} of {}\n", i + 1, pages));
    }
    out
}

pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render and write the report into `dir`, returning the file path.
pub fn write_report(
    report: &Report,
    format: ReportFormat,
    dir: &Path,
    rows_per_page: usize,
) -> Result<PathBuf> {
    let body = match format {
        ReportFormat::Text => render_text(report, rows_per_page),
        ReportFormat::Json => render_json(report)?,
    };
    let path = dir.join(format!("{}.{}", report.file_stem, format.extension()));
    std::fs::write(&path, body).with_context(|| format!("Write report to {}", path.display()))?;
    info!(path = %path.display(), "report written");
    Ok(path)
}
