// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, bail, Result};
use rusqlite::Connection;

use crate::db;

pub const KEY_URL: &str = "url";
pub const KEY_API_KEY: &str = "api_key";
pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_USER_ID: &str = "user_id";
pub const KEY_ROWS_PER_PAGE: &str = "rows_per_page";

pub const KEYS: [&str; 5] = [
    KEY_URL,
    KEY_API_KEY,
    KEY_ACCESS_TOKEN,
    KEY_USER_ID,
    KEY_ROWS_PER_PAGE,
];

pub const DEFAULT_ROWS_PER_PAGE: usize = 40;

/// Effective settings: stored values overridden by env/flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub rows_per_page: usize,
}

impl Settings {
    pub fn load(conn: &Connection, global: &clap::ArgMatches) -> Result<Self> {
        let mut s = Self::from_store(conn)?;
        s.apply_overrides(global);
        Ok(s)
    }

    pub fn from_store(conn: &Connection) -> Result<Self> {
        let rows_per_page = match db::get_setting(conn, KEY_ROWS_PER_PAGE)? {
            Some(v) => v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow!("Stored rows_per_page '{}' is not a positive integer", v))?,
            None => DEFAULT_ROWS_PER_PAGE,
        };
        Ok(Self {
            url: db::get_setting(conn, KEY_URL)?,
            api_key: db::get_setting(conn, KEY_API_KEY)?,
            access_token: db::get_setting(conn, KEY_ACCESS_TOKEN)?,
            user_id: db::get_setting(conn, KEY_USER_ID)?,
            rows_per_page,
        })
    }

    /// Global `--url/--api-key/--token/--user` (clap also fills these from
    /// the FINANCEFLOW_* environment variables).
    pub fn apply_overrides(&mut self, global: &clap::ArgMatches) {
        let pick = |id: &str| global.get_one::<String>(id).cloned();
        if let Some(v) = pick("url") {
            self.url = Some(v);
        }
        if let Some(v) = pick("api_key") {
            self.api_key = Some(v);
        }
        if let Some(v) = pick("token") {
            self.access_token = Some(v);
        }
        if let Some(v) = pick("user") {
            self.user_id = Some(v);
        }
    }

    /// Fetches are skipped entirely when no signed-in owner is configured.
    pub fn require_owner(&self) -> Result<&str> {
        match self.user_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => bail!("Not signed in: set a user id with `financeflow config set user_id <ID>` or FINANCEFLOW_USER_ID"),
        }
    }
}

pub fn check_key(key: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        bail!("Unknown setting '{}' (expected one of: {})", key, KEYS.join(", "));
    }
    Ok(())
}

/// Validate a key/value pair before it reaches the settings table.
pub fn check_setting(key: &str, value: &str) -> Result<()> {
    check_key(key)?;
    if key == KEY_ROWS_PER_PAGE && !matches!(value.parse::<usize>(), Ok(n) if n > 0) {
        bail!("rows_per_page must be a positive integer, got '{}'", value);
    }
    if key == KEY_URL && !(value.starts_with("http://") || value.starts_with("https://")) {
        bail!("url must start with http:// or https://, got '{}'", value);
    }
    Ok(())
}
