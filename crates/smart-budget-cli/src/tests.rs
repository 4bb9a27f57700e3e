//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use smart_budget_core::ai::MockBackend;
use smart_budget_core::{AIClient, Database, InsightEngine, MonthKey, TransactionType};

use crate::commands::{self, truncate};

const MONTH: &str = "2025-03";

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn month() -> MonthKey {
    MONTH.parse().unwrap()
}

/// March 2025 with income, rent, and a budget
fn seeded_db() -> Database {
    let db = setup_test_db();
    commands::cmd_budget_set(&db, "MMK", 1500.0, Some(MONTH)).unwrap();
    commands::cmd_add(
        &db,
        "Salary",
        3000.0,
        "income",
        Some("Salary"),
        Some(MONTH),
        Some(1),
    )
    .unwrap();
    commands::cmd_add(
        &db,
        "Rent",
        1000.0,
        "expense",
        Some("Rent"),
        Some(MONTH),
        Some(2),
    )
    .unwrap();
    db
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer title", 10), "a much ...");
    assert_eq!(truncate("Café au lait", 6), "Caf...");
}

#[test]
fn test_progress_bar() {
    assert_eq!(commands::progress_bar(0.0, 4), "░░░░");
    assert_eq!(commands::progress_bar(50.0, 4), "██░░");
    assert_eq!(commands::progress_bar(250.0, 4), "████");
}

#[test]
fn test_resolve_month_defaults_to_view_month() {
    let db = setup_test_db();
    commands::cmd_settings(&db, None, Some("2024-07"), None).unwrap();

    assert_eq!(
        commands::resolve_month(&db, None).unwrap().to_string(),
        "2024-07"
    );
    assert_eq!(
        commands::resolve_month(&db, Some("2025-01")).unwrap().to_string(),
        "2025-01"
    );
    assert!(commands::resolve_month(&db, Some("Jan 2025")).is_err());
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_add() {
    let db = seeded_db();

    let transactions = db.list_transactions(month(), None).unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].title, "Rent");
    assert_eq!(transactions[0].tx_type, TransactionType::Expense);
    assert_eq!(
        transactions[1].date.format("%Y-%m-%d").to_string(),
        "2025-03-01"
    );
}

#[test]
fn test_cmd_add_rejects_bad_input() {
    let db = setup_test_db();

    assert!(commands::cmd_add(&db, "Gift", 10.0, "transfer", None, Some(MONTH), None).is_err());
    assert!(commands::cmd_add(&db, "Gift", -10.0, "income", None, Some(MONTH), None).is_err());
    assert!(commands::cmd_add(&db, "Gift", 10.0, "income", None, Some("2025-3"), None).is_err());
    assert!(db.list_months().unwrap().is_empty());
}

#[test]
fn test_cmd_list() {
    let db = seeded_db();
    assert!(commands::cmd_list(&db, Some(MONTH), None).is_ok());
    assert!(commands::cmd_list(&db, Some(MONTH), Some(2)).is_ok());
    assert!(commands::cmd_list(&db, Some(MONTH), Some(32)).is_err());
    assert!(commands::cmd_list(&db, Some("2025-04"), None).is_ok());
}

#[test]
fn test_cmd_delete() {
    let db = seeded_db();
    let id = db.list_transactions(month(), None).unwrap()[0].id.clone();

    assert!(commands::cmd_delete(&db, &id).is_ok());
    assert!(db.get_transaction(&id).unwrap().is_none());
    assert!(commands::cmd_delete(&db, &id).is_err());
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budget() {
    let db = seeded_db();
    assert_eq!(db.month_stats(month()).unwrap().budget_limit, 1500.0);

    assert!(commands::cmd_budget_show(&db, "MMK", Some(MONTH)).is_ok());
    assert!(commands::cmd_budget_set(&db, "MMK", -1.0, Some(MONTH)).is_err());

    commands::cmd_budget_set(&db, "MMK", 0.0, Some(MONTH)).unwrap();
    assert_eq!(db.month_stats(month()).unwrap().budget_limit, 0.0);
}

// ========== Report Command Tests ==========

#[test]
fn test_report_commands() {
    let db = seeded_db();
    let engine = InsightEngine::new();

    assert!(commands::cmd_summary(&db, &engine, Some(MONTH), None, false).is_ok());
    assert!(commands::cmd_summary(&db, &engine, Some(MONTH), Some(1), true).is_ok());
    assert!(commands::cmd_summary(&db, &engine, Some(MONTH), Some(40), false).is_err());
    assert!(commands::cmd_insights(&db, &engine, Some(MONTH), false).is_ok());
    assert!(commands::cmd_insights(&db, &engine, Some(MONTH), true).is_ok());
    assert!(commands::cmd_health(&db, Some(MONTH)).is_ok());
    assert!(commands::cmd_breakdown(&db, "MMK", Some(MONTH)).is_ok());
}

#[test]
fn test_report_commands_on_empty_month() {
    let db = setup_test_db();
    let engine = InsightEngine::new();

    assert!(commands::cmd_summary(&db, &engine, Some(MONTH), None, false).is_ok());
    assert!(commands::cmd_health(&db, Some(MONTH)).is_ok());
    assert!(commands::cmd_breakdown(&db, "MMK", Some(MONTH)).is_ok());
}

#[test]
fn test_cmd_months() {
    let db = setup_test_db();
    assert!(commands::cmd_months(&db, "MMK").is_ok());

    let db = seeded_db();
    assert!(commands::cmd_months(&db, "MMK").is_ok());
}

#[tokio::test]
async fn test_cmd_tip() {
    let db = seeded_db();

    assert!(commands::cmd_tip(&db, None, Some(MONTH)).await.is_ok());

    let client = AIClient::Mock(MockBackend::unhealthy());
    assert!(commands::cmd_tip(&db, Some(&client), Some(MONTH)).await.is_ok());
}

// ========== Backup Command Tests ==========

#[test]
fn test_cmd_export_import() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("backup.json");

    let db = seeded_db();
    commands::cmd_export(&db, Some(&backup), None).unwrap();
    assert!(backup.exists());

    let fresh = setup_test_db();
    commands::cmd_import(&fresh, &backup).unwrap();
    assert_eq!(
        fresh.month_stats(month()).unwrap(),
        db.month_stats(month()).unwrap()
    );
}

#[test]
fn test_cmd_export_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("march.csv");

    let db = seeded_db();
    commands::cmd_export(&db, Some(&csv_path), Some(MONTH)).unwrap();

    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("id,date,type,category,title,amount"));
    assert_eq!(content.lines().count(), 3);

    assert!(commands::cmd_export(&db, Some(&csv_path), Some("March")).is_err());
}

#[test]
fn test_cmd_import_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"not-a-month": {}}"#).unwrap();

    let db = seeded_db();
    assert!(commands::cmd_import(&db, &bad).is_err());
    assert!(commands::cmd_import(&db, &dir.path().join("missing.json")).is_err());
    // Existing data untouched
    assert_eq!(db.list_transactions(month(), None).unwrap().len(), 2);
}

// ========== Settings Command Tests ==========

#[test]
fn test_cmd_settings() {
    let db = setup_test_db();

    commands::cmd_settings(&db, Some(false), Some("2025-01"), None).unwrap();
    let view = db.load_view_config().unwrap();
    assert!(!view.dark_mode);
    assert_eq!(view.current_month.to_string(), "2025-01");

    commands::cmd_settings(&db, None, None, Some(-1)).unwrap();
    assert_eq!(
        db.load_view_config().unwrap().current_month.to_string(),
        "2024-12"
    );

    assert!(commands::cmd_settings(&db, None, Some("2025-00"), None).is_err());
    assert!(commands::cmd_settings(&db, None, None, None).is_ok());
}

// ========== Init Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("budget.db");

    commands::cmd_init(&path).unwrap();
    assert!(path.exists());

    let db = commands::open_db(&path).unwrap();
    assert!(db.get_setting("current_month").unwrap().is_some());
}
