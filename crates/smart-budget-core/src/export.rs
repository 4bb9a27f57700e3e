//! Backup export/import and CSV export
//!
//! Backups are pretty-printed JSON objects keyed by month (`"2025-03"`), each
//! holding `income`, `budgetLimit`, and `transactions`. Import also accepts
//! the wrapped form `{ "monthsData": {...}, "currentMonth": "2025-03" }`.

use std::collections::HashSet;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{AppState, AppStore, MonthKey};

/// Counts from a successful import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub months: usize,
    pub transactions: usize,
    /// Whether the backup carried a current month that was applied
    pub current_month_restored: bool,
}

/// File name for a backup taken on `date`: `budget_backup_YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("budget_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON of every stored month
pub fn export_store_json(db: &Database) -> Result<String> {
    let store = db.load_store()?;
    Ok(serde_json::to_string_pretty(&store)?)
}

/// Parse a backup, accepting the bare store or the wrapped app state
pub fn parse_backup(json: &str) -> Result<(AppStore, Option<MonthKey>)> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let Some(object) = value.as_object() else {
        return Err(Error::InvalidData(
            "Backup must be a JSON object keyed by month".into(),
        ));
    };

    if object.contains_key("monthsData") {
        let valid = object.get("monthsData").is_some_and(|m| m.is_object())
            && object.get("currentMonth").is_some_and(|c| c.is_string());
        if !valid {
            warn!("Backup has monthsData but an invalid structure");
            return Err(Error::InvalidData(
                "Backup needs a monthsData object and a currentMonth string".into(),
            ));
        }
        let state: AppState = serde_json::from_value(value)
            .map_err(|e| Error::InvalidData(format!("Invalid backup: {}", e)))?;
        check_unique_ids(&state.months_data)?;
        return Ok((state.months_data, Some(state.current_month)));
    }

    let store: AppStore = serde_json::from_value(value)
        .map_err(|e| Error::InvalidData(format!("Invalid backup: {}", e)))?;
    check_unique_ids(&store)?;
    Ok((store, None))
}

/// Transaction ids must be unique across every month
fn check_unique_ids(store: &AppStore) -> Result<()> {
    let mut seen = HashSet::new();
    for (month, data) in store {
        for tx in &data.transactions {
            if !seen.insert(tx.id.as_str()) {
                return Err(Error::InvalidData(format!(
                    "Invalid backup: duplicate transaction id '{}' in {}",
                    tx.id, month
                )));
            }
        }
    }
    Ok(())
}

/// Replace the store with a backup's contents
pub fn import_store_json(db: &Database, json: &str) -> Result<ImportStats> {
    let (store, current_month) = parse_backup(json)?;
    db.replace_store(&store)?;

    if let Some(month) = current_month {
        let mut view = db.load_view_config()?;
        view.current_month = month;
        db.save_view_config(&view)?;
    }

    let stats = ImportStats {
        months: store.len(),
        transactions: store.values().map(|m| m.transactions.len()).sum(),
        current_month_restored: current_month.is_some(),
    };
    info!(
        months = stats.months,
        transactions = stats.transactions,
        "Backup imported"
    );
    Ok(stats)
}

/// Write one month's transactions as CSV, returning the row count
pub fn export_transactions_csv<W: Write>(
    db: &Database,
    month: MonthKey,
    writer: W,
) -> Result<usize> {
    let transactions = db.list_transactions(month, None)?;
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["id", "date", "type", "category", "title", "amount"])?;
    for tx in &transactions {
        let date = tx.date.to_rfc3339();
        let amount = tx.amount.to_string();
        wtr.write_record([
            tx.id.as_str(),
            date.as_str(),
            tx.tx_type.as_str(),
            tx.category.as_str(),
            tx.title.as_str(),
            amount.as_str(),
        ])?;
    }
    wtr.flush()?;

    Ok(transactions.len())
}
