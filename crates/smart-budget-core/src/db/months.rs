//! Month-level operations: budget limits, totals, and store snapshots

use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::Database;
use crate::error::{Error, Result};
use crate::insights::PreviousPeriodFigures;
use crate::models::{AppStore, BudgetStats, MonthData, MonthKey};

impl Database {
    pub(crate) fn ensure_month(conn: &Connection, month: MonthKey) -> Result<()> {
        conn.execute(
            "INSERT OR IGNORE INTO months (month) VALUES (?)",
            params![month.to_string()],
        )?;
        Ok(())
    }

    fn month_row(conn: &Connection, month: MonthKey) -> Result<Option<(f64, f64)>> {
        let row = conn
            .query_row(
                "SELECT income, budget_limit FROM months WHERE month = ?",
                params![month.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(row)
    }

    /// Whether anything has been stored for `month`
    pub fn month_exists(&self, month: MonthKey) -> Result<bool> {
        let conn = self.conn()?;
        Ok(Self::month_row(&conn, month)?.is_some())
    }

    /// Stored data for a month; an empty month when nothing is stored
    pub fn get_month_data(&self, month: MonthKey) -> Result<MonthData> {
        let conn = self.conn()?;
        let Some((income, budget_limit)) = Self::month_row(&conn, month)? else {
            return Ok(MonthData::default());
        };

        Ok(MonthData {
            income,
            budget_limit,
            transactions: Self::month_transactions(&conn, month)?,
        })
    }

    /// Set the month's budget limit (0 clears it)
    pub fn set_budget_limit(&self, month: MonthKey, limit: f64) -> Result<()> {
        if !limit.is_finite() || limit < 0.0 {
            return Err(Error::InvalidData(format!(
                "Budget limit must be zero or positive, got {}",
                limit
            )));
        }

        let conn = self.conn()?;
        Self::ensure_month(&conn, month)?;
        conn.execute(
            "UPDATE months SET budget_limit = ?, updated_at = CURRENT_TIMESTAMP WHERE month = ?",
            params![limit, month.to_string()],
        )?;
        Ok(())
    }

    /// Totals for the whole month
    pub fn month_stats(&self, month: MonthKey) -> Result<BudgetStats> {
        let conn = self.conn()?;
        let budget_limit = Self::month_row(&conn, month)?
            .map(|(_, limit)| limit)
            .unwrap_or(0.0);

        let (total_income, total_expense): (f64, f64) = conn.query_row(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN tx_type = 'income' THEN amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN tx_type = 'expense' THEN amount ELSE 0 END), 0)
            FROM transactions
            WHERE month = ?
            "#,
            params![month.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(BudgetStats {
            total_income,
            total_expense,
            balance: total_income - total_expense,
            budget_limit,
        })
    }

    /// Income and expense totals for the month before `month`
    ///
    /// `None` when that month was never stored, so the insight engine can
    /// tell "no history" apart from an empty month.
    pub fn previous_period_figures(
        &self,
        month: MonthKey,
    ) -> Result<Option<PreviousPeriodFigures>> {
        let previous = month.previous();
        if !self.month_exists(previous)? {
            return Ok(None);
        }
        let stats = self.month_stats(previous)?;
        Ok(Some(PreviousPeriodFigures::new(
            stats.total_income,
            stats.total_expense,
        )))
    }

    /// All stored months, oldest first
    pub fn list_months(&self) -> Result<Vec<MonthKey>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT month FROM months ORDER BY month")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        keys.iter().map(|k| k.parse()).collect()
    }

    /// Snapshot of every stored month
    pub fn load_store(&self) -> Result<AppStore> {
        let mut store = AppStore::new();
        for month in self.list_months()? {
            store.insert(month, self.get_month_data(month)?);
        }
        Ok(store)
    }

    /// Replace all months and transactions with `store`
    ///
    /// Runs in one SQLite transaction; on error nothing changes.
    pub fn replace_store(&self, store: &AppStore) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute_batch("DELETE FROM transactions; DELETE FROM months;")?;

        for (month, data) in store {
            tx.execute(
                "INSERT INTO months (month, income, budget_limit) VALUES (?, ?, ?)",
                params![month.to_string(), data.income, data.budget_limit],
            )?;
            // Stored newest first; insert oldest first so sequence order matches
            for transaction in data.transactions.iter().rev() {
                Self::write_transaction(&tx, *month, transaction)?;
            }
        }

        tx.commit()?;
        info!(months = store.len(), "Store replaced");
        Ok(())
    }
}
