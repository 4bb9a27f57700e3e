//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overall severity for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

/// Income, expense, and budget figures for the period being analyzed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodFigures {
    pub income: f64,
    pub expenses: f64,
    /// 0 means no budget is set
    pub budget_limit: f64,
}

impl PeriodFigures {
    pub fn new(income: f64, expenses: f64, budget_limit: f64) -> Self {
        Self {
            income,
            expenses,
            budget_limit,
        }
    }

    pub fn savings(&self) -> f64 {
        self.income - self.expenses
    }

    /// Savings as a percentage of income, 0 when there is no income
    pub fn savings_rate(&self) -> f64 {
        if self.income > 0.0 {
            self.savings() / self.income * 100.0
        } else {
            0.0
        }
    }
}

/// Totals for the period immediately before the analyzed one
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviousPeriodFigures {
    pub income: f64,
    pub expenses: f64,
}

impl PreviousPeriodFigures {
    pub fn new(income: f64, expenses: f64) -> Self {
        Self { income, expenses }
    }

    pub fn savings(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Expense total for one category within a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: f64,
    /// Rounded share of the period's expenses, 0-100
    pub percentage: u32,
    /// Chart color (hex)
    #[serde(default)]
    pub color: String,
    /// Legend swatch class
    #[serde(default)]
    pub swatch: String,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, total_amount: f64, percentage: u32) -> Self {
        let category = category.into();
        let style = super::breakdown::category_style(&category);
        Self {
            category,
            total_amount,
            percentage,
            color: style.color.to_string(),
            swatch: style.swatch.to_string(),
        }
    }
}

/// Output of the insight generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightResult {
    /// Summary fragments joined with single spaces
    pub summary: String,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevel,
}
