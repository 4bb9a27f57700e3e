//! Insight Engine - rule-based budget analysis
//!
//! Pure functions over a snapshot of one period's figures:
//!
//! - **Insights** - ordered rules producing warnings, recommendations,
//!   a risk level, and a summary narrative
//! - **Budget status** - progress against the month's budget limit
//! - **Financial health** - 0-100 score from the savings rate
//! - **Category breakdown** - expense totals per category, the input to
//!   the concentration rule
//!
//! ## Usage
//!
//! ```rust,ignore
//! use smart_budget_core::insights::{calculate_category_breakdown, generate_financial_insights};
//!
//! let breakdown = calculate_category_breakdown(&month.transactions);
//! let stats = month.stats();
//! let result = generate_financial_insights(
//!     stats.total_income,
//!     stats.total_expense,
//!     stats.budget_limit,
//!     &breakdown,
//!     previous,
//! );
//! ```

pub mod breakdown;
pub mod budget_status;
pub mod engine;
pub mod health;
pub mod rules;
pub mod types;

pub use breakdown::{calculate_category_breakdown, category_style, CategoryStyle};
pub use budget_status::{
    calculate_budget_status, used_percent_rounded, BudgetStatus, BudgetStatusResult,
};
pub use engine::{
    generate_financial_insights, InsightAccumulator, InsightContext, InsightEngine, InsightRule,
};
pub use health::{calculate_financial_health, has_financial_activity, HealthResult, HealthStatus};
pub use types::{CategoryTotal, InsightResult, PeriodFigures, PreviousPeriodFigures, RiskLevel};

/// Round to the nearest integer with halves going up (toward +infinity)
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
