//! One-line budgeting tips from an LLM
//!
//! [`get_budget_tip`] always returns displayable text: missing data, a
//! missing client, empty replies, and request failures each map to a fixed
//! message.

use tracing::warn;

use crate::models::Transaction;

use super::{AIBackend, AIClient};

/// Shown when there is nothing to analyze
pub const NO_TRANSACTIONS_TIP: &str = "Add some transactions to get personalized AI budget tips!";

/// Shown when the model returns nothing or no client is configured
pub const FALLBACK_TIP: &str = "Keep tracking your spending to stay on top of your goals!";

/// Shown when the request fails
pub const ERROR_TIP: &str = "Error getting AI insights. Check your connection.";

/// Flatten transactions into the tip prompt, one `type: title ($amount)` line each
pub fn build_tip_prompt(transactions: &[Transaction]) -> String {
    let summary = transactions
        .iter()
        .map(|t| format!("{}: {} (${})", t.tx_type, t.title, t.amount))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze these transactions and give one short, helpful, and motivating budgeting tip (max 2 sentences): \n{}",
        summary
    )
}

/// Ask the configured model for a tip; never fails
pub async fn get_budget_tip(client: Option<&AIClient>, transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return NO_TRANSACTIONS_TIP.to_string();
    }

    let Some(client) = client else {
        return FALLBACK_TIP.to_string();
    };

    let prompt = build_tip_prompt(transactions);
    match client.generate_text(&prompt).await {
        Ok(text) if text.trim().is_empty() => FALLBACK_TIP.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!(error = %e, host = client.host(), "AI tip request failed");
            ERROR_TIP.to_string()
        }
    }
}
