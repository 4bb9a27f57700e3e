//! View settings command

use anyhow::{Context, Result};
use smart_budget_core::{Database, MonthKey};

pub fn cmd_settings(
    db: &Database,
    dark_mode: Option<bool>,
    month: Option<&str>,
    shift: Option<i32>,
) -> Result<()> {
    let mut view = db.load_view_config()?;
    let changed = dark_mode.is_some() || month.is_some() || shift.is_some();

    if let Some(dark_mode) = dark_mode {
        view.dark_mode = dark_mode;
    }
    if let Some(month) = month {
        view.current_month = month
            .parse::<MonthKey>()
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
    }
    if let Some(months) = shift {
        view = view.navigate(months);
    }

    if changed {
        db.save_view_config(&view)?;
        println!("✅ Settings saved");
    }

    println!();
    println!("⚙️  Settings");
    println!(
        "   Current month: {} ({})",
        view.current_month.label(),
        view.current_month
    );
    println!(
        "   Dark mode:     {}",
        if view.dark_mode { "on" } else { "off" }
    );
    Ok(())
}
