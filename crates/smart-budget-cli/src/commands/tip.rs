//! AI tip command

use anyhow::Result;
use smart_budget_core::ai::{get_budget_tip, AIBackend, AIClient};
use smart_budget_core::Database;

use super::resolve_month;

pub async fn cmd_tip(db: &Database, ai: Option<&AIClient>, month: Option<&str>) -> Result<()> {
    let month = resolve_month(db, month)?;
    let transactions = db.list_transactions(month, None)?;

    match ai {
        Some(client) => println!(
            "🤖 Asking {} for a tip on {}...",
            client.model(),
            month.label()
        ),
        None => println!("   💡 Tip: Set GEMINI_API_KEY (or AI_BACKEND=ollama) for AI tips"),
    }

    let tip = get_budget_tip(ai, &transactions).await;

    println!();
    println!("✨ {}", tip);
    Ok(())
}
