// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use super::connect_as_owner;
use super::transactions::resolve_category;
use crate::config::Settings;
use crate::models::{Category, NewCategory, TxType, DEFAULT_CATEGORY_COLOR};
use crate::utils::{maybe_print_json, parse_color, parse_name, pretty_table, required};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let cat = new_category_from(sub)?;
            let (client, owner) = connect_as_owner(settings)?;
            let created = client
                .create_category(&owner, &cat)
                .context("Create category")?;
            println!("Added {} category '{}'", created.kind, created.name);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("type")
                .map(|s| s.parse::<TxType>())
                .transpose()?;
            let (client, owner) = connect_as_owner(settings)?;
            let cats = client.list_categories(&owner, kind)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                // income first, then expense; each already sorted by name
                let mut data = Vec::new();
                for k in [TxType::Income, TxType::Expense] {
                    for c in cats.iter().filter(|c| c.kind == k) {
                        data.push(vec![
                            c.name.clone(),
                            c.kind.to_string(),
                            c.color.clone().unwrap_or_default(),
                            c.icon.clone().unwrap_or_default(),
                            c.id.clone(),
                        ]);
                    }
                }
                println!(
                    "{}",
                    pretty_table(&["Category", "Type", "Color", "Icon", "ID"], data)
                );
            }
        }
        Some(("rm", sub)) => {
            let (client, owner) = connect_as_owner(settings)?;
            let cats = client.list_categories(&owner, None)?;
            let cat = category_to_remove(sub, &cats)?;
            client
                .delete_category(&cat.id)
                .with_context(|| format!("Delete category '{}'", cat.name))?;
            println!("Removed category '{}'", cat.name);
        }
        _ => {}
    }
    Ok(())
}

pub fn new_category_from(sub: &clap::ArgMatches) -> Result<NewCategory> {
    let name = parse_name(required(sub, "name")?)?;
    let kind: TxType = required(sub, "type")?.parse()?;
    let color = match sub.get_one::<String>("color") {
        Some(c) => parse_color(c)?,
        None => DEFAULT_CATEGORY_COLOR.to_string(),
    };
    let icon = sub
        .get_one::<String>("icon")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    Ok(NewCategory {
        name,
        kind,
        color,
        icon,
    })
}

/// `rm` target; `--type` picks between same-named income and expense rows.
pub fn category_to_remove<'a>(
    sub: &clap::ArgMatches,
    cats: &'a [Category],
) -> Result<&'a Category> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxType>())
        .transpose()?;
    Ok(resolve_category(cats, required(sub, "name")?, kind)?)
}
