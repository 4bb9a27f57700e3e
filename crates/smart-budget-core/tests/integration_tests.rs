//! Integration tests for smart-budget-core
//!
//! These tests exercise the record → dashboard → insights → backup workflow.

use chrono::{DateTime, NaiveDate, Utc};
use smart_budget_core::{
    backup_file_name,
    export::{export_store_json, import_store_json},
    generate_financial_insights, BudgetStatus, Database, InsightEngine, MonthDashboard, MonthKey,
    NewTransaction, RiskLevel, TransactionType, ViewConfig,
};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn add(
    db: &Database,
    month: MonthKey,
    title: &str,
    amount: f64,
    kind: TransactionType,
    category: &str,
    day: u32,
) {
    db.insert_transaction(
        month,
        NewTransaction::new(title, amount, kind).with_category(category),
        Some(day),
        ts("2025-04-30T18:00:00Z"),
    )
    .unwrap();
}

#[test]
fn test_overspent_month_workflow() {
    let db = Database::in_memory().unwrap();
    let march: MonthKey = "2025-03".parse().unwrap();
    let april = march.next();

    // March: healthy month
    add(
        &db,
        march,
        "Salary",
        3000.0,
        TransactionType::Income,
        "Salary",
        1,
    );
    add(
        &db,
        march,
        "Rent",
        1000.0,
        TransactionType::Expense,
        "Rent",
        2,
    );

    // April: same income, blown budget
    db.set_budget_limit(april, 1500.0).unwrap();
    add(
        &db,
        april,
        "Salary",
        3000.0,
        TransactionType::Income,
        "Salary",
        1,
    );
    add(
        &db,
        april,
        "Rent",
        1000.0,
        TransactionType::Expense,
        "Rent",
        2,
    );
    add(
        &db,
        april,
        "Laptop",
        1750.0,
        TransactionType::Expense,
        "Shopping",
        15,
    );

    let dash = MonthDashboard::build(&db, &ViewConfig::for_month(april), &InsightEngine::new())
        .unwrap();

    assert_eq!(dash.stats.total_expense, 2750.0);
    assert_eq!(dash.stats.balance, 250.0);
    assert_eq!(dash.budget.status, BudgetStatus::OverLimit);
    assert_eq!(dash.budget.remaining, -1250.0);
    assert_eq!(dash.budget.percent, 100.0);

    let health = dash.health.unwrap();
    // 8.33% savings -> 40, minus the over-budget penalty
    assert_eq!(health.score, 20);

    let insights = dash.insights.unwrap();
    assert_eq!(insights.risk_level, RiskLevel::High);
    assert!(insights
        .warnings
        .iter()
        .any(|w| w == "Critical: You have exceeded your budget limit by 1,250 MMK."));
    assert!(insights
        .warnings
        .iter()
        .any(|w| w.starts_with("Your total savings have decreased")));
    assert!(insights
        .recommendations
        .iter()
        .any(|r| r.contains("\"Shopping\"")));
    assert!(insights
        .recommendations
        .iter()
        .any(|r| r.starts_with("Immediate action required")));
}

#[test]
fn test_dashboard_matches_direct_engine_call() {
    let db = Database::in_memory().unwrap();
    let month: MonthKey = "2025-04".parse().unwrap();
    add(
        &db,
        month,
        "Pay",
        1200.0,
        TransactionType::Income,
        "Salary",
        3,
    );
    add(
        &db,
        month,
        "Food",
        300.0,
        TransactionType::Expense,
        "Food",
        4,
    );

    let dash = MonthDashboard::build(&db, &ViewConfig::for_month(month), &InsightEngine::new())
        .unwrap();
    let direct = generate_financial_insights(1200.0, 300.0, 0.0, &dash.breakdown, None);
    assert_eq!(dash.insights.unwrap(), direct);
}

#[test]
fn test_backup_round_trip_between_databases() {
    let source = Database::in_memory().unwrap();
    let month: MonthKey = "2025-04".parse().unwrap();
    source.set_budget_limit(month, 900.0).unwrap();
    add(
        &source,
        month,
        "Pay",
        1200.0,
        TransactionType::Income,
        "Salary",
        3,
    );
    add(
        &source,
        month,
        "Cinema",
        25.0,
        TransactionType::Expense,
        "Entertainment",
        9,
    );

    let json = export_store_json(&source).unwrap();
    let target = Database::in_memory().unwrap();
    let stats = import_store_json(&target, &json).unwrap();

    assert_eq!(stats.months, 1);
    assert_eq!(stats.transactions, 2);
    assert_eq!(
        target.month_stats(month).unwrap(),
        source.month_stats(month).unwrap()
    );
    assert_eq!(
        backup_file_name(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()),
        "budget_backup_2025-04-30.json"
    );
}
