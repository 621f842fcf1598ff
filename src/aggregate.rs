// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a fetched transaction snapshot.
//!
//! Nothing here performs I/O or keeps state between calls: every function
//! borrows the snapshot and returns owned values.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Category, CategoryRef, Transaction, TxType};

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const NEUTRAL_COLOR: &str = "#6b7280";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthPoint {
    /// First day of the month.
    pub month: NaiveDate,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Lookup from category id to display metadata.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    by_id: HashMap<String, CategoryRef>,
}

impl CategoryIndex {
    /// Index the category rows the backend embedded in the snapshot.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut idx = CategoryIndex::default();
        for t in transactions {
            if let (Some(id), Some(cat)) = (&t.category_id, &t.categories) {
                idx.by_id.entry(id.clone()).or_insert_with(|| cat.clone());
            }
        }
        idx
    }

    /// Add (or replace) entries from a separately fetched category list.
    pub fn extend_with(&mut self, categories: &[Category]) {
        for c in categories {
            self.by_id.insert(
                c.id.clone(),
                CategoryRef {
                    name: c.name.clone(),
                    icon: c.icon.clone(),
                    color: c.color.clone(),
                },
            );
        }
    }

    pub fn get(&self, id: &str) -> Option<&CategoryRef> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Name and color for a transaction, degrading to the sentinel bucket.
    pub fn resolve(&self, category_id: Option<&str>) -> (String, String) {
        match category_id.and_then(|id| self.get(id)) {
            Some(cat) if !cat.name.is_empty() => {
                let color = cat
                    .color
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .unwrap_or(NEUTRAL_COLOR);
                (cat.name.clone(), color.to_string())
            }
            _ => (UNCATEGORIZED.to_string(), NEUTRAL_COLOR.to_string()),
        }
    }
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut out = Totals {
        count: transactions.len(),
        ..Totals::default()
    };
    for t in transactions {
        match t.kind {
            TxType::Income => out.total_income += t.amount,
            TxType::Expense => out.total_expense += t.amount,
        }
    }
    out.balance = out.total_income - out.total_expense;
    out
}

/// Per-category totals for one transaction type, largest first.
pub fn category_breakdown(transactions: &[Transaction], kind: TxType) -> Vec<CategoryTotal> {
    let index = CategoryIndex::from_transactions(transactions);
    category_breakdown_with(transactions, kind, &index)
}

pub fn category_breakdown_with(
    transactions: &[Transaction],
    kind: TxType,
    index: &CategoryIndex,
) -> Vec<CategoryTotal> {
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut items: Vec<CategoryTotal> = Vec::new();
    for t in transactions.iter().filter(|t| t.kind == kind) {
        let (name, color) = index.resolve(t.category_id.as_deref());
        match order.get(&name) {
            Some(&pos) => {
                items[pos].total += t.amount;
                items[pos].color = color;
            }
            None => {
                order.insert(name.clone(), items.len());
                items.push(CategoryTotal {
                    name,
                    total: t.amount,
                    color,
                });
            }
        }
    }
    // stable: ties keep first-observed order
    items.sort_by(|a, b| b.total.cmp(&a.total));
    items
}

/// Income/expense/net for the `window` months ending at `reference`'s month,
/// oldest first. Always exactly `window` points.
pub fn monthly_series(
    transactions: &[Transaction],
    window: usize,
    reference: NaiveDate,
) -> Vec<MonthPoint> {
    if window == 0 {
        return Vec::new();
    }
    let last = first_of_month(reference);
    let first = last
        .checked_sub_months(Months::new((window - 1) as u32))
        .unwrap_or(NaiveDate::MIN);

    let mut points: Vec<MonthPoint> = (0..window)
        .map(|i| {
            let month = first
                .checked_add_months(Months::new(i as u32))
                .unwrap_or(last);
            MonthPoint {
                month,
                label: month_label(month),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
                net: Decimal::ZERO,
            }
        })
        .collect();

    let end = last_of_month(last);
    for t in transactions {
        if t.date < first || t.date > end {
            continue;
        }
        let slot = month_index(t.date) - month_index(first);
        let p = &mut points[slot as usize];
        match t.kind {
            TxType::Income => p.income += t.amount,
            TxType::Expense => p.expense += t.amount,
        }
    }
    for p in &mut points {
        p.net = p.income - p.expense;
    }
    points
}

/// The first `n` records of a date-descending snapshot.
pub fn recent(transactions: &[Transaction], n: usize) -> &[Transaction] {
    &transactions[..n.min(transactions.len())]
}

pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn last_of_month(d: NaiveDate) -> NaiveDate {
    first_of_month(d)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(d)
}

/// "Jan 24" style label.
pub fn month_label(d: NaiveDate) -> String {
    d.format("%b %y").to_string()
}

fn month_index(d: NaiveDate) -> i64 {
    d.year() as i64 * 12 + d.month0() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_handle_leap_february() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(first_of_month(d), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last_of_month(d), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let d = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(last_of_month(d), d);
    }

    #[test]
    fn label_is_short_month_and_year() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(month_label(d), "Jan 24");
    }
}
