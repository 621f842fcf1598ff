// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::path::PathBuf;

use super::connect_as_owner;
use super::dashboard::breakdown_table;
use crate::aggregate::{
    category_breakdown_with, monthly_series, totals, CategoryIndex, CategoryTotal, MonthPoint,
};
use crate::config::Settings;
use crate::models::{TransactionFilters, TxType};
use crate::report::{build_report, write_report, ReportFormat};
use crate::utils::{fmt_currency, parse_months, pretty_table, required};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(settings, sub)?,
        Some(("export", sub)) => export(settings, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ReportView {
    monthly: Vec<MonthPoint>,
    expense_categories: Vec<CategoryTotal>,
    income_sources: Vec<CategoryTotal>,
}

fn months_of(sub: &clap::ArgMatches) -> Result<usize> {
    let n = sub.get_one::<usize>("months").copied().unwrap_or(6);
    Ok(parse_months(n)?)
}

fn show(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let months = months_of(sub)?;
    let (client, owner) = connect_as_owner(settings)?;
    let transactions = client
        .list_transactions(&owner, &TransactionFilters::default())
        .context("Load transactions")?;
    let mut index = CategoryIndex::from_transactions(&transactions);
    index.extend_with(&client.list_categories(&owner, None).context("Load categories")?);
    let view = ReportView {
        monthly: monthly_series(&transactions, months, Local::now().date_naive()),
        expense_categories: category_breakdown_with(&transactions, TxType::Expense, &index),
        income_sources: category_breakdown_with(&transactions, TxType::Income, &index),
    };
    if sub.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Income vs Expenses (last {} months)", months);
    let rows = view
        .monthly
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                fmt_currency(&p.income),
                fmt_currency(&p.expense),
                fmt_currency(&p.net),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense", "Net"], rows));

    let t = totals(&transactions);
    println!("Expense Categories");
    if view.expense_categories.is_empty() {
        println!("No expense data");
    } else {
        println!("{}", breakdown_table(&view.expense_categories, t.total_expense));
    }
    println!("Income Sources");
    if view.income_sources.is_empty() {
        println!("No income data");
    } else {
        println!("{}", breakdown_table(&view.income_sources, t.total_income));
    }
    Ok(())
}

fn export(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let months = months_of(sub)?;
    let format: ReportFormat = required(sub, "format")?.parse()?;
    let out_dir = PathBuf::from(required(sub, "out_dir")?);
    if !out_dir.is_dir() {
        anyhow::bail!("Output directory {} does not exist", out_dir.display());
    }
    let rows_per_page = sub
        .get_one::<usize>("rows_per_page")
        .copied()
        .unwrap_or(settings.rows_per_page);

    let (client, owner) = connect_as_owner(settings)?;
    let transactions = client
        .list_transactions(&owner, &TransactionFilters::default())
        .context("Load transactions")?;
    let now = Local::now().naive_local();
    let series = monthly_series(&transactions, months, now.date());
    let report = build_report(&transactions, &series, now);
    let path = write_report(&report, format, &out_dir, rows_per_page)?;
    println!(
        "Report with {} transactions written to {}",
        report.transactions.len(),
        path.display()
    );
    Ok(())
}
