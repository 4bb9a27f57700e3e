//! Smart Budget Core Library
//!
//! Shared functionality for the Smart Budget tracker:
//! - Month-keyed transaction store (SQLite)
//! - Rule-based insight engine, budget status and financial health scoring
//! - Category breakdown for the expense chart and concentration rule
//! - Dashboard assembly driven by an explicit view configuration
//! - JSON backup export/import and CSV export
//! - Pluggable AI tip backends (Gemini, Ollama, mock)

pub mod ai;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod export;
pub mod format;
pub mod insights;
pub mod models;

/// Test utilities including a mock LLM server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{get_budget_tip, AIBackend, AIClient, GeminiBackend, MockBackend, OllamaBackend};
pub use config::{AiConfig, AppConfig, DisplayConfig, ServerSettings, StorageConfig};
pub use dashboard::{DayGroup, MonthDashboard};
pub use db::Database;
pub use error::{Error, Result};
pub use export::{backup_file_name, ImportStats};
pub use insights::{
    calculate_budget_status, calculate_category_breakdown, calculate_financial_health,
    generate_financial_insights, BudgetStatus, BudgetStatusResult, CategoryTotal, HealthResult,
    HealthStatus, InsightEngine, InsightResult, PeriodFigures, PreviousPeriodFigures, RiskLevel,
};
pub use models::{
    AppState, AppStore, BudgetStats, MonthData, MonthKey, NewTransaction, Transaction,
    TransactionType, ViewConfig,
};
