// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financeflow::commands::transactions::{
    filters_from, new_transaction_from, patch_from, resolve_category,
};
use financeflow::errors::ValidationError;
use financeflow::models::{Category, TxType};
use financeflow::cli;
use rust_decimal::Decimal;

fn cat(id: &str, name: &str, kind: TxType) -> Category {
    Category {
        id: id.into(),
        user_id: "u1".into(),
        name: name.into(),
        kind,
        icon: None,
        color: Some("#6366f1".into()),
        created_at: None,
    }
}

fn categories() -> Vec<Category> {
    vec![
        cat("c1", "Food", TxType::Expense),
        cat("c2", "Salary", TxType::Income),
        cat("c3", "Gifts", TxType::Income),
        cat("c4", "Gifts", TxType::Expense),
    ]
}

fn tx_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["financeflow", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some((_, sub)) => sub.clone(),
            None => panic!("no tx subcommand"),
        },
        _ => panic!("no tx command"),
    }
}

#[test]
fn add_builds_payload_with_category_of_same_type() {
    let sub = tx_matches(&[
        "add", "--type", "expense", "--amount", "12.50", "--date", "2024-01-15",
        "--category", "food", "--description", "  Lunch ",
    ]);
    let tx = new_transaction_from(&sub, &categories()).unwrap();
    assert_eq!(tx.kind, TxType::Expense);
    assert_eq!(tx.amount, Decimal::new(1250, 2));
    assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(tx.category_id.as_deref(), Some("c1"));
    assert_eq!(tx.description.as_deref(), Some("Lunch"));
}

#[test]
fn add_rejects_category_of_other_type() {
    let sub = tx_matches(&[
        "add", "--type", "income", "--amount", "5", "--date", "2024-01-15", "--category", "Food",
    ]);
    let err = new_transaction_from(&sub, &categories()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::CategoryTypeMismatch {
            name: "Food".into(),
            category: "expense".into(),
            transaction: "income".into(),
        })
    );
}

#[test]
fn add_rejects_bad_amounts_and_dates() {
    for (amount, date) in [("abc", "2024-01-01"), ("-3", "2024-01-01"), ("0", "2024-01-01"), ("1.005", "2024-01-01"), ("10", "2024-13-01")] {
        let sub = tx_matches(&["add", "--type", "expense", "--amount", amount, "--date", date]);
        let err = new_transaction_from(&sub, &[]).unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some(), "{} {}", amount, date);
    }
}

#[test]
fn same_name_prefers_matching_type() {
    let cats = categories();
    assert_eq!(resolve_category(&cats, "gifts", Some(TxType::Expense)).unwrap().id, "c4");
    assert_eq!(resolve_category(&cats, "Gifts", Some(TxType::Income)).unwrap().id, "c3");
    assert_eq!(resolve_category(&cats, "c2", None).unwrap().name, "Salary");
    assert_eq!(
        resolve_category(&cats, "Travel", None).unwrap_err(),
        ValidationError::UnknownCategory("Travel".into())
    );
}

#[test]
fn list_filters_from_flags() {
    let sub = tx_matches(&[
        "list", "--from", "2024-01-01", "--to", "2024-01-31", "--type", "income",
        "--category", "Salary", "--search", "pay", "--limit", "2",
    ]);
    let f = filters_from(&sub, &categories()).unwrap();
    assert_eq!(f.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(f.end_date, NaiveDate::from_ymd_opt(2024, 1, 31));
    assert_eq!(f.kind, Some(TxType::Income));
    assert_eq!(f.category_id.as_deref(), Some("c2"));
    assert_eq!(f.search.as_deref(), Some("pay"));
    assert_eq!(sub.get_one::<usize>("limit"), Some(&2));
}

#[test]
fn edit_patch_checks_category_against_stored_type() {
    let sub = tx_matches(&["edit", "t1", "--category", "Salary"]);
    assert!(patch_from(&sub, &categories(), Some(TxType::Expense)).is_err());
    let patch = patch_from(&sub, &categories(), Some(TxType::Income)).unwrap();
    assert_eq!(patch.category_id, Some(Some("c2".to_string())));
    assert!(patch.kind.is_none());
}

#[test]
fn edit_can_clear_category() {
    let sub = tx_matches(&["edit", "t1", "--clear-category", "--amount", "9.99"]);
    let patch = patch_from(&sub, &[], None).unwrap();
    assert_eq!(patch.category_id, Some(None));
    assert_eq!(patch.amount, Some(Decimal::new(999, 2)));
}

#[test]
fn edit_without_changes_is_rejected() {
    let sub = tx_matches(&["edit", "t1"]);
    let err = patch_from(&sub, &[], None).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::EmptyPatch)
    );
}

#[test]
fn category_and_clear_category_conflict() {
    let res = cli::build_cli().try_get_matches_from([
        "financeflow", "tx", "edit", "t1", "--category", "Food", "--clear-category",
    ]);
    assert!(res.is_err());
}

#[test]
fn untyped_lookup_of_shared_name_is_ambiguous() {
    let cats = categories();
    assert_eq!(
        resolve_category(&cats, "Gifts", None).unwrap_err(),
        ValidationError::AmbiguousCategory("Gifts".into())
    );
    assert_eq!(resolve_category(&cats, "c4", None).unwrap().kind, TxType::Expense);
    assert_eq!(resolve_category(&cats, "food", None).unwrap().id, "c1");
}

#[test]
fn list_filter_resolves_category_of_requested_type() {
    let sub = tx_matches(&["list", "--type", "expense", "--category", "Gifts"]);
    let f = filters_from(&sub, &categories()).unwrap();
    assert_eq!(f.kind, Some(TxType::Expense));
    assert_eq!(f.category_id.as_deref(), Some("c4"));

    let sub = tx_matches(&["list", "--category", "Gifts"]);
    let err = filters_from(&sub, &categories()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::AmbiguousCategory("Gifts".into()))
    );
}
