//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and months commands plus shared utilities (open_db, resolve_month)
//! - `transactions` - Record, list, and delete transactions
//! - `budget` - Budget limit commands
//! - `reports` - Summary, insights, health, and breakdown reports
//! - `tip` - AI budgeting tip
//! - `backup` - JSON backup export/import and CSV export
//! - `settings` - View settings
//! - `serve` - Web server command

pub mod backup;
pub mod budget;
pub mod core;
pub mod reports;
pub mod serve;
pub mod settings;
pub mod tip;
pub mod transactions;

// Re-export command functions for main.rs
pub use self::core::*;
pub use backup::*;
pub use budget::*;
pub use reports::*;
pub use serve::*;
pub use settings::*;
pub use tip::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
