// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use serde_json::json;
use std::path::Path;
use tracing::info;

use super::connect_as_owner;
use crate::config::Settings;
use crate::models::{Transaction, TransactionFilters};
use crate::utils::required;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(settings, sub),
        _ => Ok(()),
    }
}

fn export_transactions(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    if !matches!(fmt.as_str(), "csv" | "json") {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let (client, owner) = connect_as_owner(settings)?;
    let rows = client
        .list_transactions(&owner, &TransactionFilters::default())
        .context("Load transactions")?;
    write_transactions(&rows, &fmt, Path::new(out))?;
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

/// Write the snapshot as `csv` or `json`, in snapshot order.
pub fn write_transactions(rows: &[Transaction], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out.display()))?;
            wtr.write_record(["date", "type", "amount", "category", "description", "id"])?;
            for t in rows {
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.categories.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
                    t.description.clone().unwrap_or_default(),
                    t.id.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = rows
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.to_string(),
                        "type": t.kind,
                        "amount": t.amount.to_string(),
                        "category": t.categories.as_ref().map(|c| c.name.clone()),
                        "description": t.description,
                        "id": t.id,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    info!(path = %out.display(), count = rows.len(), "transactions exported");
    Ok(())
}
