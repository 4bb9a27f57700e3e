//! Backup export/import commands

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use smart_budget_core::export::{export_store_json, export_transactions_csv, import_store_json};
use smart_budget_core::{backup_file_name, Database, MonthKey};

pub fn cmd_export(db: &Database, output: Option<&Path>, csv_month: Option<&str>) -> Result<()> {
    if let Some(month) = csv_month {
        let month: MonthKey = month
            .parse()
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;

        let count = match output {
            Some(path) => {
                let file = fs::File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let count = export_transactions_csv(db, month, file)?;
                println!("✅ Exported {} transactions to {}", count, path.display());
                count
            }
            None => export_transactions_csv(db, month, io::stdout().lock())?,
        };
        tracing::debug!(count, month = %month, "CSV export finished");
        return Ok(());
    }

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(backup_file_name(Utc::now().date_naive())));
    let json = export_store_json(db).context("Failed to export data")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    let months = db.list_months()?.len();
    println!("✅ Backed up {} month(s) to {}", months, path.display());
    Ok(())
}

pub fn cmd_import(db: &Database, file: &Path) -> Result<()> {
    println!("📥 Importing backup from {}...", file.display());

    let json = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let stats = import_store_json(db, &json).context("Invalid backup file")?;

    println!(
        "✅ Restored {} month(s), {} transaction(s)",
        stats.months, stats.transactions
    );
    if stats.current_month_restored {
        println!("   Current month restored from backup");
    }
    Ok(())
}
