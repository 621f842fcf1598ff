// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::config::{
    check_key, check_setting, Settings, KEYS, KEY_ACCESS_TOKEN, KEY_API_KEY, KEY_URL, KEY_USER_ID,
};
use crate::db::{set_setting, unset_setting};
use crate::utils::{mask_secret, pretty_table, required};

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            let value = required(sub, "value")?.trim();
            check_setting(key, value)?;
            set_setting(conn, key, value)?;
            println!("Set {}", key);
        }
        Some(("unset", sub)) => {
            let key = required(sub, "key")?;
            check_key(key)?;
            if unset_setting(conn, key)? {
                println!("Unset {}", key);
            } else {
                println!("{} was not set", key);
            }
        }
        Some(("show", _)) | None => {
            println!("{}", pretty_table(&["Setting", "Value"], show_rows(settings)));
        }
        _ => {}
    }
    Ok(())
}

/// Effective values with secrets masked.
pub fn show_rows(settings: &Settings) -> Vec<Vec<String>> {
    KEYS.iter()
        .map(|key| {
            let value = match *key {
                KEY_URL => settings.url.clone(),
                KEY_API_KEY => settings.api_key.as_deref().map(mask_secret),
                KEY_ACCESS_TOKEN => settings.access_token.as_deref().map(mask_secret),
                KEY_USER_ID => settings.user_id.clone(),
                _ => Some(settings.rows_per_page.to_string()),
            };
            vec![key.to_string(), value.unwrap_or_else(|| "(not set)".to_string())]
        })
        .collect()
}
