//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use tally_core::db::Database;

use crate::commands::{self, parse_amount_arg};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

// ========== Amount Parsing ==========

#[test]
fn test_parse_amount_arg_accepts_comma() {
    assert_eq!(parse_amount_arg("5,50").unwrap(), 5.5);
    assert_eq!(parse_amount_arg("12.00").unwrap(), 12.0);
}

#[test]
fn test_parse_amount_arg_rejects_garbage() {
    assert!(parse_amount_arg("a lot").is_err());
    assert!(parse_amount_arg("-3").is_err());
}

// ========== Record Commands ==========

#[test]
fn test_cmd_spend_records_expense() {
    let db = setup_test_db();
    commands::cmd_spend(&db, 1, "food_out", "12,50").unwrap();

    let totals = db.month_category_totals(1).unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].category, "food_out");
    assert_eq!(totals[0].total, 12.5);
}

#[test]
fn test_cmd_spend_rejects_unknown_category() {
    let db = setup_test_db();
    assert!(commands::cmd_spend(&db, 1, "lottery", "5.00").is_err());
    assert!(db.month_category_totals(1).unwrap().is_empty());
}

#[test]
fn test_cmd_save_records_saving() {
    let db = setup_test_db();
    commands::cmd_save(&db, 1, "7.25").unwrap();

    let total = db
        .savings_total(1, tally_core::models::Period::Month)
        .unwrap();
    assert_eq!(total, 7.25);
}

// ========== Status / Renew ==========

#[test]
fn test_cmd_status_runs_on_empty_db() {
    let db = setup_test_db();
    assert!(commands::cmd_status(&db, 1).is_ok());
}

#[test]
fn test_cmd_renew_reports_ok() {
    let db = setup_test_db();
    db.add_subscription(1, "Music", 5.0).unwrap();
    assert!(commands::cmd_renew(&db).is_ok());
}

// ========== Subscription Commands ==========

#[test]
fn test_cmd_sub_lifecycle() {
    let db = setup_test_db();
    commands::cmd_sub_add(&db, 1, "Music", "5,00").unwrap();
    commands::cmd_sub_disable(&db, 1, "Music").unwrap();
    commands::cmd_sub_enable(&db, 1, "Music").unwrap();
    commands::cmd_sub_list(&db, 1, true).unwrap();

    let subs = db.list_subscriptions(1, true).unwrap();
    assert_eq!(subs.len(), 1);
    assert!(subs[0].is_active);
}

#[test]
fn test_cmd_sub_disable_missing_fails() {
    let db = setup_test_db();
    assert!(commands::cmd_sub_disable(&db, 1, "Ghost").is_err());
}

// ========== Chart / Report Commands ==========

#[tokio::test]
async fn test_cmd_chart_writes_artifact() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    commands::cmd_spend(&db, 1, "food_out", "50").unwrap();

    commands::cmd_chart(&db, 1, dir.path()).await.unwrap();
    let produced: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(produced.len(), 1);
}

#[test]
fn test_cmd_report_writes_files() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    db.add_expense(1, tally_core::categories::Category::Tech, 30.0)
        .unwrap();

    commands::cmd_report(&db, 1, true, dir.path()).unwrap();
    let produced: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(produced.len(), 3);
}
