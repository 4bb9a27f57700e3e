//! Smart Budget CLI - Monthly budget tracker
//!
//! Usage:
//!   smart-budget add "Lunch" 12.5 -c Food   Record an expense
//!   smart-budget summary                     Month overview with insights
//!   smart-budget budget set 1500             Set this month's limit
//!   smart-budget serve --port 3000           Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use smart_budget_core::{AIClient, AppConfig, InsightEngine};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(db) = cli.db {
        config.storage.db_path = Some(db);
    }
    let db_path = config.storage.resolved_db_path();

    let currency = config.display.currency.as_str();
    let engine = InsightEngine::new().with_currency(currency);
    let open_db = || commands::open_db(&db_path);

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Add {
            title,
            amount,
            tx_type,
            category,
            month,
            day,
        } => commands::cmd_add(
            &open_db()?,
            &title,
            amount,
            &tx_type,
            category.as_deref(),
            month.as_deref(),
            day,
        ),
        Commands::List { month, day } => commands::cmd_list(&open_db()?, month.as_deref(), day),
        Commands::Delete { id } => commands::cmd_delete(&open_db()?, &id),
        Commands::Budget { action } => match action {
            BudgetCommands::Set { limit, month } => {
                commands::cmd_budget_set(&open_db()?, currency, limit, month.as_deref())
            }
            BudgetCommands::Show { month } => {
                commands::cmd_budget_show(&open_db()?, currency, month.as_deref())
            }
        },
        Commands::Summary { month, day, json } => {
            commands::cmd_summary(&open_db()?, &engine, month.as_deref(), day, json)
        }
        Commands::Insights { month, json } => {
            commands::cmd_insights(&open_db()?, &engine, month.as_deref(), json)
        }
        Commands::Health { month } => commands::cmd_health(&open_db()?, month.as_deref()),
        Commands::Breakdown { month } => {
            commands::cmd_breakdown(&open_db()?, currency, month.as_deref())
        }
        Commands::Tip { month } => {
            let ai = AIClient::from_config(&config.ai);
            commands::cmd_tip(&open_db()?, ai.as_ref(), month.as_deref()).await
        }
        Commands::Months => commands::cmd_months(&open_db()?, currency),
        Commands::Export { output, csv } => {
            commands::cmd_export(&open_db()?, output.as_deref(), csv.as_deref())
        }
        Commands::Import { file } => commands::cmd_import(&open_db()?, &file),
        Commands::Settings {
            dark_mode,
            month,
            shift,
        } => commands::cmd_settings(&open_db()?, dark_mode, month.as_deref(), shift),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            commands::cmd_serve(
                &db_path,
                &config,
                host.as_deref(),
                port,
                static_dir.as_deref(),
            )
            .await
        }
    }
}
