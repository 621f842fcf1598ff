// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use financeflow::{cli, commands, config::Settings, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let settings = Settings::load(&conn, &matches)?;

    match matches.subcommand() {
        Some(("config", sub)) => commands::config::handle(&conn, &settings, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&settings, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&settings, sub)?,
        Some(("category", sub)) => commands::categories::handle(&settings, sub)?,
        Some(("report", sub)) => commands::reports::handle(&settings, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&settings, sub)?,
        Some(("admin", sub)) => commands::admin::handle(&settings, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
