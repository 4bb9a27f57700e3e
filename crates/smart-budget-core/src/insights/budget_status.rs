//! Budget progress classification

use serde::Serialize;
use std::fmt;

/// Usage percent at which an in-budget month is flagged
const WARNING_PERCENT: f64 = 80.0;

/// Where a month stands against its budget limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    NotSet,
    OnTrack,
    Warning,
    OverLimit,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::NotSet => "not_set",
            BudgetStatus::OnTrack => "on_track",
            BudgetStatus::Warning => "warning",
            BudgetStatus::OverLimit => "over_limit",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::NotSet => "Not Set",
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::OverLimit => "Over Limit",
        }
    }

    /// Progress bar color; Warning and OverLimit share the same red
    pub fn color(&self) -> &'static str {
        match self {
            BudgetStatus::NotSet => "#94a3b8",
            BudgetStatus::OnTrack => "#10b981",
            BudgetStatus::Warning | BudgetStatus::OverLimit => "#f43f5e",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Budget progress for a month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetStatusResult {
    /// Share of the limit consumed, capped at 100
    pub percent: f64,
    /// Limit minus expenses; negative when over
    pub remaining: f64,
    pub status: BudgetStatus,
    pub label: &'static str,
    pub color: &'static str,
}

impl BudgetStatusResult {
    fn new(percent: f64, remaining: f64, status: BudgetStatus) -> Self {
        Self {
            percent,
            remaining,
            status,
            label: status.label(),
            color: status.color(),
        }
    }
}

/// Classify expenses against a budget limit (0 or less means unset)
pub fn calculate_budget_status(expenses: f64, budget_limit: f64) -> BudgetStatusResult {
    if budget_limit <= 0.0 {
        return BudgetStatusResult::new(0.0, 0.0, BudgetStatus::NotSet);
    }

    let percent = (expenses / budget_limit * 100.0).min(100.0);
    let remaining = budget_limit - expenses;

    let status = if expenses > budget_limit {
        BudgetStatus::OverLimit
    } else if percent >= WARNING_PERCENT {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OnTrack
    };

    BudgetStatusResult::new(percent, remaining, status)
}

/// Unclamped usage percent, rounded, for the headline figure next to the bar
pub fn used_percent_rounded(expenses: f64, budget_limit: f64) -> u32 {
    if budget_limit <= 0.0 {
        return 0;
    }
    (expenses / budget_limit * 100.0).round().max(0.0) as u32
}
