// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};

use super::connect_as_owner;
use crate::config::Settings;
use crate::models::{Profile, Role, RoleAssignment};
use crate::store::admin::role_for;
use crate::utils::pretty_table;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("users", _)) => users(settings),
        _ => Ok(()),
    }
}

fn users(settings: &Settings) -> Result<()> {
    let (client, owner) = connect_as_owner(settings)?;
    if client.role_of(&owner).context("Check role")? != Role::Admin {
        bail!("Admin role required");
    }
    let profiles = client.list_profiles().context("Load profiles")?;
    let roles = client.list_roles().context("Load roles")?;
    if profiles.is_empty() {
        println!("No users found");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&["Name", "Email", "Role", "Joined"], user_rows(&profiles, &roles))
    );
    Ok(())
}

pub fn user_rows(profiles: &[Profile], roles: &[RoleAssignment]) -> Vec<Vec<String>> {
    profiles
        .iter()
        .map(|p| {
            vec![
                p.display_name.clone().unwrap_or_else(|| "Unnamed".to_string()),
                p.email.clone().unwrap_or_default(),
                role_for(roles, &p.user_id).to_string(),
                p.created_at
                    .map(|d| d.format("%b %-d, %Y").to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect()
}
