// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use super::connect_as_owner;
use crate::aggregate::recent;
use crate::config::Settings;
use crate::errors::ValidationError;
use crate::models::{
    Category, NewTransaction, Transaction, TransactionFilters, TransactionPatch, TxType,
};
use crate::utils::{
    fmt_currency, maybe_print_json, parse_amount, parse_date, pretty_table, required,
};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(settings, sub)?,
        Some(("add", sub)) => add(settings, sub)?,
        Some(("edit", sub)) => edit(settings, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let (client, _owner) = connect_as_owner(settings)?;
            client
                .delete_transaction(id)
                .with_context(|| format!("Delete transaction {}", id))?;
            println!("Transaction deleted");
        }
        _ => {}
    }
    Ok(())
}

fn list(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (client, owner) = connect_as_owner(settings)?;
    let categories = if sub.contains_id("category") {
        client.list_categories(&owner, None)?
    } else {
        Vec::new()
    };
    let filters = filters_from(sub, &categories)?;
    let rows = client
        .list_transactions(&owner, &filters)
        .context("Load transactions")?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(rows.len());
    let rows = recent(&rows, limit);

    let data: Vec<TransactionLine> = rows.iter().map(TransactionLine::from).collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let table_rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Category", "Description", "Amount", "ID"],
                table_rows
            )
        );
    }
    Ok(())
}

/// Amount and date are checked before any category lookup hits the backend.
fn check_amount_and_date(sub: &clap::ArgMatches) -> Result<()> {
    if let Some(a) = sub.get_one::<String>("amount") {
        parse_amount(a)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        parse_date(d)?;
    }
    Ok(())
}

fn add(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxType = required(sub, "type")?.parse()?;
    check_amount_and_date(sub)?;
    let (client, owner) = connect_as_owner(settings)?;
    let categories = if sub.contains_id("category") {
        client.list_categories(&owner, Some(kind))?
    } else {
        Vec::new()
    };
    let tx = new_transaction_from(sub, &categories)?;
    let created = client
        .create_transaction(&owner, &tx)
        .context("Save transaction")?;
    println!(
        "Recorded {} {} on {} (id: {})",
        created.kind,
        fmt_currency(&created.amount),
        created.date,
        created.id
    );
    Ok(())
}

fn edit(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    check_amount_and_date(sub)?;
    let (client, owner) = connect_as_owner(settings)?;
    let (current_kind, categories) = if sub.contains_id("category") {
        let current = client
            .get_transaction(id)
            .with_context(|| format!("Load transaction {}", id))?;
        (Some(current.kind), client.list_categories(&owner, None)?)
    } else {
        (None, Vec::new())
    };
    let patch = patch_from(sub, &categories, current_kind)?;
    let updated = client
        .update_transaction(id, &patch)
        .with_context(|| format!("Update transaction {}", id))?;
    println!(
        "Updated {} {} on {}",
        updated.kind,
        fmt_currency(&updated.amount),
        updated.date
    );
    Ok(())
}

/// Find a category by id or (case-insensitive) name, checking that its type
/// matches the transaction type. Without a type, a name shared by an income
/// and an expense category is ambiguous.
pub fn resolve_category<'a>(
    categories: &'a [Category],
    needle: &str,
    kind: Option<TxType>,
) -> Result<&'a Category, ValidationError> {
    let matches: Vec<&Category> = match categories.iter().find(|c| c.id == needle) {
        Some(by_id) => vec![by_id],
        None => categories
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(needle.trim()))
            .collect(),
    };
    let Some(kind) = kind else {
        return match matches.as_slice() {
            [] => Err(ValidationError::UnknownCategory(needle.to_string())),
            [only] => Ok(*only),
            _ => Err(ValidationError::AmbiguousCategory(needle.trim().to_string())),
        };
    };
    if let Some(c) = matches.iter().copied().find(|c| c.kind == kind) {
        return Ok(c);
    }
    match matches.first() {
        Some(c) => Err(ValidationError::CategoryTypeMismatch {
            name: c.name.clone(),
            category: c.kind.to_string(),
            transaction: kind.to_string(),
        }),
        None => Err(ValidationError::UnknownCategory(needle.to_string())),
    }
}

pub fn filters_from(sub: &clap::ArgMatches, categories: &[Category]) -> Result<TransactionFilters> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxType>())
        .transpose()?;
    let category_id = match sub.get_one::<String>("category") {
        Some(c) => Some(resolve_category(categories, c, kind)?.id.clone()),
        None => None,
    };
    Ok(TransactionFilters {
        start_date: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        end_date: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
        kind,
        category_id,
        search: sub.get_one::<String>("search").cloned(),
    })
}

pub fn new_transaction_from(
    sub: &clap::ArgMatches,
    categories: &[Category],
) -> Result<NewTransaction> {
    let kind: TxType = required(sub, "type")?.parse()?;
    let amount = parse_amount(required(sub, "amount")?)?;
    let date = parse_date(required(sub, "date")?)?;
    let category_id = match sub.get_one::<String>("category") {
        Some(c) => Some(resolve_category(categories, c, Some(kind))?.id.clone()),
        None => None,
    };
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    Ok(NewTransaction {
        kind,
        amount,
        description,
        date,
        category_id,
    })
}

/// Build a partial update. `current_kind` is the stored type, used to check a
/// new category when `--type` is not changing.
pub fn patch_from(
    sub: &clap::ArgMatches,
    categories: &[Category],
    current_kind: Option<TxType>,
) -> Result<TransactionPatch> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxType>())
        .transpose()?;
    let category_id = if sub.get_flag("clear_category") {
        Some(None)
    } else if let Some(c) = sub.get_one::<String>("category") {
        let cat = resolve_category(categories, c, kind.or(current_kind))?;
        Some(Some(cat.id.clone()))
    } else {
        None
    };
    let patch = TransactionPatch {
        kind,
        amount: sub.get_one::<String>("amount").map(|s| parse_amount(s)).transpose()?,
        description: sub.get_one::<String>("description").cloned(),
        date: sub.get_one::<String>("date").map(|s| parse_date(s)).transpose()?,
        category_id,
    };
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch.into());
    }
    Ok(patch)
}

#[derive(Debug, Serialize)]
pub struct TransactionLine {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl From<&Transaction> for TransactionLine {
    fn from(t: &Transaction) -> Self {
        let category = match (&t.category_id, &t.categories) {
            (_, Some(c)) => c.name.clone(),
            (Some(id), None) => {
                warn!(transaction = %t.id, category = %id, "category reference did not resolve");
                crate::aggregate::UNCATEGORIZED.to_string()
            }
            (None, None) => crate::aggregate::UNCATEGORIZED.to_string(),
        };
        let sign = match t.kind {
            TxType::Income => "+",
            TxType::Expense => "-",
        };
        TransactionLine {
            id: t.id.clone(),
            date: t.date.format("%b %-d, %Y").to_string(),
            kind: t.kind.to_string(),
            category,
            description: t.description.clone().unwrap_or_default(),
            amount: format!("{}{}", sign, fmt_currency(&t.amount)),
        }
    }
}
