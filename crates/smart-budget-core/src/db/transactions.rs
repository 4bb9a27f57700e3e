//! Transaction operations

use chrono::{DateTime, Datelike, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{
    generate_transaction_id, transaction_date_for, MonthKey, NewTransaction, Transaction,
};

const TRANSACTION_COLUMNS: &str = "id, title, amount, tx_type, category, date";

impl Database {
    /// Record a transaction under `month`
    ///
    /// Without an explicit date the timestamp comes from the selected day (or
    /// today / the 1st, see [`transaction_date_for`]) with `now`'s time of day.
    /// An explicit date must fall inside `month`.
    pub fn insert_transaction(
        &self,
        month: MonthKey,
        tx: NewTransaction,
        selected_day: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        tx.validate()?;

        let date = match tx.date {
            Some(date) if !month.contains(&date) => {
                return Err(Error::InvalidData(format!(
                    "Date {} is outside {}",
                    date.date_naive(),
                    month
                )));
            }
            Some(date) => date,
            None => transaction_date_for(month, selected_day, now)?,
        };

        let transaction = tx.into_transaction(generate_transaction_id(now), date);

        let conn = self.conn()?;
        Self::ensure_month(&conn, month)?;
        Self::write_transaction(&conn, month, &transaction)?;

        debug!(id = %transaction.id, month = %month, "Transaction recorded");
        Ok(transaction)
    }

    pub(crate) fn write_transaction(
        conn: &Connection,
        month: MonthKey,
        tx: &Transaction,
    ) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO transactions (id, month, title, amount, tx_type, category, date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.id,
                month.to_string(),
                tx.title,
                tx.amount,
                tx.tx_type.as_str(),
                tx.category,
                format_datetime(&tx.date),
            ],
        )?;
        Ok(())
    }

    /// Get a transaction by ID
    pub fn get_transaction(&self, id: &str) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id],
                Self::row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete_transaction(&self, id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    /// List a month's transactions, newest entry first
    ///
    /// `day` narrows the list to one day of the month; totals elsewhere always
    /// use the whole month.
    pub fn list_transactions(&self, month: MonthKey, day: Option<u32>) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut transactions = Self::month_transactions(&conn, month)?;
        if let Some(day) = day {
            transactions.retain(|t| t.date.day() == day);
        }
        Ok(transactions)
    }

    pub(crate) fn month_transactions(
        conn: &Connection,
        month: MonthKey,
    ) -> Result<Vec<Transaction>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE month = ? ORDER BY seq DESC",
            TRANSACTION_COLUMNS
        ))?;
        let transactions = stmt
            .query_map(params![month.to_string()], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(transactions)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let tx_type_str: String = row.get(3)?;
        let date_str: String = row.get(5)?;

        Ok(Transaction {
            id: row.get(0)?,
            title: row.get(1)?,
            amount: row.get(2)?,
            tx_type: tx_type_str.parse().map_err(|e: String| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    e.into(),
                )
            })?,
            category: row.get(4)?,
            date: parse_datetime(&date_str)?,
        })
    }
}
