// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use comfy_table::Table;
use rust_decimal::Decimal;
use serde::Serialize;

use super::connect_as_owner;
use super::transactions::TransactionLine;
use crate::aggregate::{
    category_breakdown, monthly_series, recent, totals, CategoryTotal, MonthPoint, Totals,
};
use crate::config::Settings;
use crate::models::{Transaction, TransactionFilters, TxType};
use crate::utils::{fmt_currency, maybe_print_json, pretty_table};

const DASHBOARD_MONTHS: usize = 6;
const RECENT_COUNT: usize = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub monthly: Vec<MonthPoint>,
    pub expense_breakdown: Vec<CategoryTotal>,
    pub recent: Vec<TransactionLine>,
}

pub fn build(transactions: &[Transaction], today: NaiveDate) -> Dashboard {
    Dashboard {
        totals: totals(transactions),
        monthly: monthly_series(transactions, DASHBOARD_MONTHS, today),
        expense_breakdown: category_breakdown(transactions, TxType::Expense),
        recent: recent(transactions, RECENT_COUNT)
            .iter()
            .map(TransactionLine::from)
            .collect(),
    }
}

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let (client, owner) = connect_as_owner(settings)?;
    let transactions = client
        .list_transactions(&owner, &TransactionFilters::default())
        .context("Load transactions")?;
    let dash = build(&transactions, Local::now().date_naive());
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &dash)? {
        return Ok(());
    }

    let t = &dash.totals;
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Total Expenses", "Balance", "Transactions"],
            vec![vec![
                fmt_currency(&t.total_income),
                fmt_currency(&t.total_expense),
                fmt_currency(&t.balance),
                t.count.to_string(),
            ]],
        )
    );

    let monthly: Vec<Vec<String>> = dash
        .monthly
        .iter()
        .map(|p| vec![p.label.clone(), fmt_currency(&p.income), fmt_currency(&p.expense)])
        .collect();
    println!("Monthly Overview");
    println!("{}", pretty_table(&["Month", "Income", "Expense"], monthly));

    println!("Expense Breakdown");
    if dash.expense_breakdown.is_empty() {
        println!("No expense data yet");
    } else {
        println!("{}", breakdown_table(&dash.expense_breakdown, t.total_expense));
    }

    println!("Recent Transactions");
    if dash.recent.is_empty() {
        println!("No transactions yet. Add your first one with `financeflow tx add`.");
    } else {
        let rows = dash
            .recent
            .iter()
            .map(|r| {
                let label = if r.description.is_empty() {
                    r.category.clone()
                } else {
                    r.description.clone()
                };
                vec![r.date.clone(), label, r.category.clone(), r.amount.clone()]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Description", "Category", "Amount"], rows));
    }
    Ok(())
}

/// Category table with each entry's share of `whole`.
pub fn breakdown_table(items: &[CategoryTotal], whole: Decimal) -> Table {
    let rows = items
        .iter()
        .map(|c| {
            let share = if whole.is_zero() {
                Decimal::ZERO
            } else {
                (c.total * Decimal::ONE_HUNDRED / whole).round_dp(0)
            };
            vec![
                c.name.clone(),
                fmt_currency(&c.total),
                format!("{}%", share),
                c.color.clone(),
            ]
        })
        .collect();
    pretty_table(&["Category", "Total", "Share", "Color"], rows)
}
