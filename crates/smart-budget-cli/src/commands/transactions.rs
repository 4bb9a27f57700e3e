//! Transaction command implementations

use anyhow::{bail, Context, Result};
use chrono::Utc;
use smart_budget_core::dashboard::group_by_day;
use smart_budget_core::{Database, NewTransaction, Transaction, TransactionType};

use super::{resolve_month, truncate};

/// Colored, signed amount for terminal output
pub(crate) fn amount_str(tx: &Transaction) -> String {
    if tx.is_expense() {
        format!("\x1b[31m-{:.2}\x1b[0m", tx.amount) // Red for expenses
    } else {
        format!("\x1b[32m+{:.2}\x1b[0m", tx.amount) // Green for income
    }
}

pub fn cmd_add(
    db: &Database,
    title: &str,
    amount: f64,
    tx_type: &str,
    category: Option<&str>,
    month: Option<&str>,
    day: Option<u32>,
) -> Result<()> {
    let month = resolve_month(db, month)?;
    let tx_type: TransactionType = tx_type.parse().map_err(anyhow::Error::msg)?;

    let mut new_tx = NewTransaction::new(title, amount, tx_type);
    if let Some(category) = category {
        new_tx = new_tx.with_category(category);
    }

    let tx = db
        .insert_transaction(month, new_tx, day, Utc::now())
        .context("Failed to record transaction")?;

    println!(
        "✅ Recorded {} {} │ {} │ {}",
        tx.tx_type,
        amount_str(&tx),
        tx.category,
        tx.title
    );
    println!("   ID: {}", tx.id);
    println!("   Date: {}", tx.date.format("%Y-%m-%d"));

    if !tx_type.categories().iter().any(|c| *c == tx.category) {
        println!(
            "   💡 Suggested {} categories: {}",
            tx_type,
            tx_type.categories().join(", ")
        );
    }

    Ok(())
}

pub fn cmd_list(db: &Database, month: Option<&str>, day: Option<u32>) -> Result<()> {
    let month = resolve_month(db, month)?;
    if let Some(d) = day {
        if d == 0 || d > month.days_in_month() {
            bail!(
                "Day {} is outside {} (1-{})",
                d,
                month,
                month.days_in_month()
            );
        }
    }

    let transactions = db.list_transactions(month, day)?;

    if transactions.is_empty() {
        println!("No transactions for {}. Add one with:", month.label());
        println!("  smart-budget add \"Groceries\" 42 -c Food");
        return Ok(());
    }

    println!();
    match day {
        Some(d) => println!("📝 Transactions for {} {}", d, month.label()),
        None => println!("📝 Transactions for {}", month.label()),
    }

    for group in group_by_day(transactions) {
        println!();
        println!("   {}", group.date.format("%a, %b %-d"));
        println!("   ─────────────────────────────────────────────────────────────");
        for tx in &group.transactions {
            println!(
                "   {:>22} │ {:<12} │ {:<30} │ {}",
                amount_str(tx),
                truncate(&tx.category, 12),
                truncate(&tx.title, 30),
                tx.id
            );
        }
    }

    Ok(())
}

pub fn cmd_delete(db: &Database, id: &str) -> Result<()> {
    if !db.delete_transaction(id)? {
        bail!("Transaction not found: {}", id);
    }
    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}
