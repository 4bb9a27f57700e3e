//! Persisted view settings

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::Result;
use crate::models::{MonthKey, ViewConfig};

const DARK_MODE_KEY: &str = "dark_mode";
const CURRENT_MONTH_KEY: &str = "current_month";

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Saved view settings layered over the defaults
    ///
    /// Dark mode defaults to on and the month to the current one. The selected
    /// day is never persisted.
    pub fn load_view_config(&self) -> Result<ViewConfig> {
        let mut view = ViewConfig::default();

        if let Some(value) = self.get_setting(DARK_MODE_KEY)? {
            view.dark_mode = value == "true";
        }
        if let Some(value) = self.get_setting(CURRENT_MONTH_KEY)? {
            match value.parse::<MonthKey>() {
                Ok(month) => view.current_month = month,
                Err(e) => tracing::warn!(error = %e, "Ignoring stored current month"),
            }
        }

        Ok(view)
    }

    pub fn save_view_config(&self, view: &ViewConfig) -> Result<()> {
        self.set_setting(DARK_MODE_KEY, if view.dark_mode { "true" } else { "false" })?;
        self.set_setting(CURRENT_MONTH_KEY, &view.current_month.to_string())?;
        Ok(())
    }
}
