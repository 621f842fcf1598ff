// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use financeflow::commands::config::{self as config_cmd, show_rows};
use financeflow::config::{check_key, check_setting, Settings, DEFAULT_ROWS_PER_PAGE};
use financeflow::{cli, db};
use tempfile::tempdir;

#[test]
fn settings_round_trip_through_local_db() {
    let dir = tempdir().unwrap();
    let conn = db::open_at(&dir.path().join("settings.sqlite")).unwrap();

    let empty = Settings::from_store(&conn).unwrap();
    assert_eq!(empty.url, None);
    assert_eq!(empty.rows_per_page, DEFAULT_ROWS_PER_PAGE);

    db::set_setting(&conn, "url", "https://abc.supabase.co").unwrap();
    db::set_setting(&conn, "user_id", "u1").unwrap();
    db::set_setting(&conn, "rows_per_page", "25").unwrap();
    db::set_setting(&conn, "user_id", "u2").unwrap();

    let s = Settings::from_store(&conn).unwrap();
    assert_eq!(s.url.as_deref(), Some("https://abc.supabase.co"));
    assert_eq!(s.user_id.as_deref(), Some("u2"));
    assert_eq!(s.rows_per_page, 25);
    assert_eq!(db::all_settings(&conn).unwrap().len(), 3);

    assert!(db::unset_setting(&conn, "user_id").unwrap());
    assert!(!db::unset_setting(&conn, "user_id").unwrap());
    assert!(Settings::from_store(&conn).unwrap().user_id.is_none());
}

#[test]
fn flags_override_stored_values() {
    let dir = tempdir().unwrap();
    let conn = db::open_at(&dir.path().join("settings.sqlite")).unwrap();
    db::set_setting(&conn, "url", "https://stored.example").unwrap();
    db::set_setting(&conn, "user_id", "stored-user").unwrap();

    let matches = cli::build_cli().get_matches_from([
        "financeflow",
        "--user",
        "flag-user",
        "--token",
        "tok",
        "dashboard",
    ]);
    let s = Settings::load(&conn, &matches).unwrap();
    assert_eq!(s.user_id.as_deref(), Some("flag-user"));
    assert_eq!(s.access_token.as_deref(), Some("tok"));
    assert_eq!(s.url.as_deref(), Some("https://stored.example"));
}

#[test]
fn owner_precondition() {
    let mut s = Settings::default();
    assert!(s.require_owner().is_err());
    s.user_id = Some("  ".into());
    assert!(s.require_owner().is_err());
    s.user_id = Some("u1".into());
    assert_eq!(s.require_owner().unwrap(), "u1");
}

#[test]
fn setting_checks() {
    assert!(check_setting("url", "https://x.supabase.co").is_ok());
    assert!(check_setting("url", "x.supabase.co").is_err());
    assert!(check_setting("rows_per_page", "0").is_err());
    assert!(check_setting("rows_per_page", "30").is_ok());
    assert!(check_setting("currency", "USD").is_err());
}

#[test]
fn show_masks_secrets() {
    let s = Settings {
        url: Some("https://x.supabase.co".into()),
        api_key: Some("anon-key-123456".into()),
        access_token: None,
        user_id: Some("u1".into()),
        rows_per_page: 40,
    };
    let rows = show_rows(&s);
    assert_eq!(rows[0], vec!["url".to_string(), "https://x.supabase.co".to_string()]);
    assert_eq!(rows[1][1], "********3456");
    assert_eq!(rows[2][1], "(not set)");
    assert_eq!(rows[4][1], "40");
}

fn config_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["financeflow", "config"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("config", sub)) => sub.clone(),
        _ => panic!("no config command"),
    }
}

#[test]
fn url_can_be_set_and_unset() {
    let dir = tempdir().unwrap();
    let conn = db::open_at(&dir.path().join("settings.sqlite")).unwrap();
    let settings = Settings::default();

    config_cmd::handle(&conn, &settings, &config_matches(&["set", "url", "https://x.supabase.co"]))
        .unwrap();
    assert_eq!(
        db::get_setting(&conn, "url").unwrap().as_deref(),
        Some("https://x.supabase.co")
    );

    config_cmd::handle(&conn, &settings, &config_matches(&["unset", "url"])).unwrap();
    assert_eq!(db::get_setting(&conn, "url").unwrap(), None);
}

#[test]
fn unset_checks_only_the_key() {
    for key in ["url", "api_key", "access_token", "user_id", "rows_per_page"] {
        assert!(check_key(key).is_ok(), "{key}");
    }
    assert!(check_key("currency").is_err());

    let dir = tempdir().unwrap();
    let conn = db::open_at(&dir.path().join("settings.sqlite")).unwrap();
    let err = config_cmd::handle(&conn, &Settings::default(), &config_matches(&["unset", "currency"]))
        .unwrap_err();
    assert!(err.to_string().contains("Unknown setting"));
}
