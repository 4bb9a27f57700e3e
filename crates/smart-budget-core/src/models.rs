//! Domain models for Smart Budget

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category assigned when a transaction has none
pub const DEFAULT_CATEGORY: &str = "Other";

/// Categories offered when recording income
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", "Other"];

/// Categories offered when recording an expense
pub const EXPENSE_CATEGORIES: &[&str] =
    &["Food", "Transport", "Rent", "Shopping", "Health", "Other"];

/// Direction of money for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Categories suggested for this transaction type
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => INCOME_CATEGORIES,
            Self::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    #[serde(default = "default_category")]
    pub category: String,
    pub date: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.tx_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.tx_type == TransactionType::Expense
    }

    /// Category label with blanks mapped to "Other"
    pub fn category_label(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            DEFAULT_CATEGORY
        } else {
            trimmed
        }
    }
}

/// Input for recording a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    #[serde(default)]
    pub category: Option<String>,
    /// Explicit timestamp; when absent the store derives one from the month and selected day
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl NewTransaction {
    pub fn new(title: impl Into<String>, amount: f64, tx_type: TransactionType) -> Self {
        Self {
            title: title.into(),
            amount,
            tx_type,
            category: None,
            date: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Reject entries the budget views cannot use
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidData("Title must not be empty".into()));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Amount must be greater than zero, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    /// Build the stored transaction with the given id and timestamp
    pub fn into_transaction(self, id: String, date: DateTime<Utc>) -> Transaction {
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(default_category);
        Transaction {
            id,
            title: self.title.trim().to_string(),
            amount: self.amount,
            tx_type: self.tx_type,
            category,
            date,
        }
    }
}

/// Generate a transaction id of the form `tx_<unix millis>_<9 hex chars>`
pub fn generate_transaction_id(now: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("tx_{}_{}", now.timestamp_millis(), &suffix[..9])
}

/// A calendar month used as the accounting period (`YYYY-MM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!("Invalid month number: {}", month)));
        }
        Ok(Self { year, month })
    }

    /// Month containing the given timestamp
    pub fn from_date(date: &DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month of the current system clock
    pub fn current() -> Self {
        Self::from_date(&Utc::now())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Shift by a signed number of months
    pub fn offset(&self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days_in_month(&self) -> u32 {
        self.next()
            .first_day()
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(28)
    }

    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Human-readable label, e.g. "March 2025"
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(d) => d.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl std::str::FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidData(format!("Invalid month '{}', expected YYYY-MM", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Timestamp for a transaction entered while viewing `month`
///
/// Uses the selected day if there is one, otherwise today when viewing the
/// current month and the 1st for any other month. The time of day comes from
/// `now`. Days past the end of the month are clamped to its last day.
pub fn transaction_date_for(
    month: MonthKey,
    selected_day: Option<u32>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    let day = selected_day.unwrap_or(if month.contains(&now) { now.day() } else { 1 });
    let day = day.clamp(1, month.days_in_month());

    Utc.with_ymd_and_hms(
        month.year(),
        month.month(),
        day,
        now.hour(),
        now.minute(),
        now.second(),
    )
    .single()
    .ok_or_else(|| Error::InvalidData(format!("Invalid date {}-{:02}", month, day)))
}

/// Stored figures for one month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthData {
    /// Legacy stored income figure; totals are derived from transactions
    #[serde(default)]
    pub income: f64,
    /// Expense ceiling for the month, 0 when unset
    #[serde(default)]
    pub budget_limit: f64,
    /// Newest first
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl MonthData {
    pub fn stats(&self) -> BudgetStats {
        BudgetStats::from_transactions(&self.transactions, self.budget_limit)
    }
}

/// All stored months, keyed by period
pub type AppStore = BTreeMap<MonthKey, MonthData>;

/// Store plus the month being viewed, as persisted by the web client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub months_data: AppStore,
    pub current_month: MonthKey,
}

/// Aggregate totals for a month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetStats {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub budget_limit: f64,
}

impl BudgetStats {
    pub fn from_transactions(transactions: &[Transaction], budget_limit: f64) -> Self {
        let (total_income, total_expense) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(inc, exp), tx| match tx.tx_type {
                    TransactionType::Income => (inc + tx.amount, exp),
                    TransactionType::Expense => (inc, exp + tx.amount),
                });
        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
            budget_limit,
        }
    }

    pub fn has_activity(&self) -> bool {
        self.total_income != 0.0 || self.total_expense != 0.0
    }
}

/// Display state owned by the caller and passed into dashboard assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub dark_mode: bool,
    pub current_month: MonthKey,
    /// Day-of-month filter for the timeline; totals ignore it
    pub selected_day: Option<u32>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            current_month: MonthKey::current(),
            selected_day: None,
        }
    }
}

impl ViewConfig {
    pub fn for_month(month: MonthKey) -> Self {
        Self {
            current_month: month,
            ..Self::default()
        }
    }

    /// Select a day within the current month, or clear the selection with `None`
    pub fn with_selected_day(mut self, day: Option<u32>) -> Result<Self> {
        if let Some(d) = day {
            let last = self.current_month.days_in_month();
            if d == 0 || d > last {
                return Err(Error::InvalidData(format!(
                    "Day {} is outside {} (1-{})",
                    d, self.current_month, last
                )));
            }
        }
        self.selected_day = day;
        Ok(self)
    }

    /// Move to another month; the day selection does not carry over
    pub fn navigate(mut self, months: i32) -> Self {
        self.current_month = self.current_month.offset(months);
        self.selected_day = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_month_key_parse_and_display() {
        let key: MonthKey = "2025-03".parse().unwrap();
        assert_eq!(key.year(), 2025);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2025-03");

        assert!("2025-13".parse::<MonthKey>().is_err());
        assert!("2025-3".parse::<MonthKey>().is_err());
        assert!("March".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_key_navigation_crosses_years() {
        let jan: MonthKey = "2025-01".parse().unwrap();
        assert_eq!(jan.previous().to_string(), "2024-12");
        assert_eq!(jan.previous().next(), jan);
        assert_eq!(jan.offset(14).to_string(), "2026-03");
        assert_eq!(jan.offset(-25).to_string(), "2022-12");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!("2024-02".parse::<MonthKey>().unwrap().days_in_month(), 29);
        assert_eq!("2025-02".parse::<MonthKey>().unwrap().days_in_month(), 28);
        assert_eq!("2025-04".parse::<MonthKey>().unwrap().days_in_month(), 30);
        assert_eq!("2025-12".parse::<MonthKey>().unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_month_key_serde_as_string() {
        let key: MonthKey = "2025-07".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-07\"");
        let back: MonthKey = serde_json::from_str("\"2025-07\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<MonthKey>("\"bogus\"").is_err());
    }

    #[test]
    fn test_transaction_date_uses_selected_day() {
        let month: MonthKey = "2025-03".parse().unwrap();
        let now = ts("2025-05-20T14:30:15Z");
        let date = transaction_date_for(month, Some(7), now).unwrap();
        assert_eq!(date, ts("2025-03-07T14:30:15Z"));
    }

    #[test]
    fn test_transaction_date_defaults() {
        let now = ts("2025-05-20T09:05:00Z");

        // Viewing the current month defaults to today
        let current: MonthKey = "2025-05".parse().unwrap();
        assert_eq!(
            transaction_date_for(current, None, now).unwrap(),
            ts("2025-05-20T09:05:00Z")
        );

        // Any other month defaults to the 1st
        let other: MonthKey = "2025-02".parse().unwrap();
        assert_eq!(
            transaction_date_for(other, None, now).unwrap(),
            ts("2025-02-01T09:05:00Z")
        );

        // Day past the end is clamped
        assert_eq!(
            transaction_date_for(other, Some(31), now).unwrap(),
            ts("2025-02-28T09:05:00Z")
        );
    }

    #[test]
    fn test_new_transaction_validation() {
        assert!(NewTransaction::new("Lunch", 12.5, TransactionType::Expense)
            .validate()
            .is_ok());
        assert!(NewTransaction::new("  ", 12.5, TransactionType::Expense)
            .validate()
            .is_err());
        assert!(NewTransaction::new("Lunch", 0.0, TransactionType::Expense)
            .validate()
            .is_err());
        assert!(NewTransaction::new("Lunch", f64::NAN, TransactionType::Expense)
            .validate()
            .is_err());
    }

    #[test]
    fn test_blank_category_becomes_other() {
        let tx = NewTransaction::new(" Bus ", 3.0, TransactionType::Expense)
            .with_category("   ")
            .into_transaction("tx_1".into(), ts("2025-01-01T00:00:00Z"));
        assert_eq!(tx.category, "Other");
        assert_eq!(tx.title, "Bus");
    }

    #[test]
    fn test_transaction_id_format() {
        let now = ts("2025-01-01T00:00:00Z");
        let id = generate_transaction_id(now);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "tx");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert_ne!(id, generate_transaction_id(now));
    }

    #[test]
    fn test_budget_stats_totals() {
        let now = ts("2025-01-10T00:00:00Z");
        let txs = vec![
            NewTransaction::new("Salary", 1000.0, TransactionType::Income)
                .into_transaction("a".into(), now),
            NewTransaction::new("Rent", 400.0, TransactionType::Expense)
                .into_transaction("b".into(), now),
            NewTransaction::new("Food", 150.0, TransactionType::Expense)
                .into_transaction("c".into(), now),
        ];
        let stats = BudgetStats::from_transactions(&txs, 500.0);
        assert_eq!(stats.total_income, 1000.0);
        assert_eq!(stats.total_expense, 550.0);
        assert_eq!(stats.balance, 450.0);
        assert_eq!(stats.budget_limit, 500.0);
        assert!(stats.has_activity());
        assert!(!BudgetStats::default().has_activity());
    }

    #[test]
    fn test_view_config_day_selection() {
        let view = ViewConfig::for_month("2025-02".parse().unwrap());
        assert!(view.dark_mode);
        assert_eq!(
            view.with_selected_day(Some(28)).unwrap().selected_day,
            Some(28)
        );
        assert!(view.with_selected_day(Some(29)).is_err());
        assert!(view.with_selected_day(Some(0)).is_err());

        let moved = view.with_selected_day(Some(3)).unwrap().navigate(1);
        assert_eq!(moved.current_month.to_string(), "2025-03");
        assert_eq!(moved.selected_day, None);
    }

    #[test]
    fn test_transaction_json_shape() {
        let json = r#"{"id":"tx_1","title":"Coffee","amount":3.5,"type":"expense","date":"2025-01-02T08:00:00Z"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.tx_type, TransactionType::Expense);
        assert_eq!(tx.category, "Other");
        let out = serde_json::to_value(&tx).unwrap();
        assert_eq!(out["type"], "expense");
    }
}
