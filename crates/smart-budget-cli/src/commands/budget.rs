//! Budget limit commands

use anyhow::{Context, Result};
use smart_budget_core::format::format_currency;
use smart_budget_core::{calculate_budget_status, BudgetStatus, Database, MonthKey};

use super::resolve_month;

/// Width of the terminal progress bar in cells
const BAR_WIDTH: usize = 30;

/// ANSI color for a budget status
pub(crate) fn status_color(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::NotSet => "\x1b[2m",
        BudgetStatus::OnTrack => "\x1b[32m",
        BudgetStatus::Warning => "\x1b[33m",
        BudgetStatus::OverLimit => "\x1b[31m",
    }
}

/// Filled/empty bar for a 0-100 percent
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn cmd_budget_set(
    db: &Database,
    currency: &str,
    limit: f64,
    month: Option<&str>,
) -> Result<()> {
    let month = resolve_month(db, month)?;
    db.set_budget_limit(month, limit)
        .context("Failed to set budget limit")?;

    if limit == 0.0 {
        println!("✅ Budget limit cleared for {}", month.label());
    } else {
        println!(
            "✅ Budget limit for {} set to {}",
            month.label(),
            format_currency(limit, currency)
        );
    }

    print_budget(db, currency, month)
}

pub fn cmd_budget_show(db: &Database, currency: &str, month: Option<&str>) -> Result<()> {
    let month = resolve_month(db, month)?;
    print_budget(db, currency, month)
}

pub(crate) fn print_budget(db: &Database, currency: &str, month: MonthKey) -> Result<()> {
    let stats = db.month_stats(month)?;
    let budget = calculate_budget_status(stats.total_expense, stats.budget_limit);

    println!();
    println!("🎯 Budget: {}", month.label());

    if budget.status == BudgetStatus::NotSet {
        println!("   No limit set. Set one with: smart-budget budget set <amount>");
        return Ok(());
    }

    let color = status_color(budget.status);
    println!(
        "   {}{}\x1b[0m {:.0}%  {}{}\x1b[0m",
        color,
        progress_bar(budget.percent, BAR_WIDTH),
        budget.percent,
        color,
        budget.label
    );
    println!(
        "   Spent {} of {}",
        format_currency(stats.total_expense, currency),
        format_currency(stats.budget_limit, currency)
    );
    if budget.remaining >= 0.0 {
        println!(
            "   Remaining: {}",
            format_currency(budget.remaining, currency)
        );
    } else {
        println!(
            "   \x1b[31mOver by: {}\x1b[0m",
            format_currency(-budget.remaining, currency)
        );
    }

    Ok(())
}
