// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod admin;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod exporter;
pub mod reports;
pub mod transactions;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::store::StoreClient;
use crate::utils::http_client;

/// Build a backend client from the effective settings.
pub fn connect(settings: &Settings) -> Result<StoreClient> {
    let url = settings
        .url
        .as_deref()
        .context("Backend url not configured: `financeflow config set url <URL>` or FINANCEFLOW_URL")?;
    let key = settings
        .api_key
        .as_deref()
        .context("API key not configured: `financeflow config set api_key <KEY>` or FINANCEFLOW_API_KEY")?;
    let client = StoreClient::new(http_client()?, url, key, settings.access_token.as_deref())?;
    Ok(client)
}

/// The owner check runs before any connection is made.
pub fn connect_as_owner(settings: &Settings) -> Result<(StoreClient, String)> {
    let owner = settings.require_owner()?.to_string();
    Ok((connect(settings)?, owner))
}
