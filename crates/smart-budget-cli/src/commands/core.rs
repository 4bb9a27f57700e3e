//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `resolve_month` - Month argument or the saved view month
//! - `cmd_init` - Initialize the database
//! - `cmd_months` - List stored months

use std::path::Path;

use anyhow::{Context, Result};
use smart_budget_core::format::format_currency;
use smart_budget_core::{Database, MonthKey};

/// Open the database, creating its parent directory if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Parse a `YYYY-MM` argument, falling back to the saved view month
pub fn resolve_month(db: &Database, month: Option<&str>) -> Result<MonthKey> {
    match month {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", value)),
        None => Ok(db.load_view_config()?.current_month),
    }
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let view = db.load_view_config()?;
    db.save_view_config(&view)
        .context("Failed to save default settings")?;
    println!("   Current month: {}", view.current_month.label());

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set a budget: smart-budget budget set 1500");
    println!("  2. Record spending: smart-budget add \"Groceries\" 42 -c Food");
    println!("  3. See how you're doing: smart-budget summary");

    Ok(())
}

pub fn cmd_months(db: &Database, currency: &str) -> Result<()> {
    let months = db.list_months()?;

    if months.is_empty() {
        println!("No months recorded yet. Add a transaction with:");
        println!("  smart-budget add \"Salary\" 2000 -t income");
        return Ok(());
    }

    let current = db.load_view_config()?.current_month;

    println!();
    println!("📅 Months");
    println!("   ─────────────────────────────────────────────────────────────");

    for month in months {
        let stats = db.month_stats(month)?;
        let marker = if month == current { "▶" } else { " " };
        println!(
            " {} {} │ {:<14} │ in {:>14} │ out {:>14}",
            marker,
            month,
            month.label(),
            format_currency(stats.total_income, currency),
            format_currency(stats.total_expense, currency),
        );
    }

    Ok(())
}
