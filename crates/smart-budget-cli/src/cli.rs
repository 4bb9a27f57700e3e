//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Smart Budget - Track a monthly budget and get rule-based insights
#[derive(Parser)]
#[command(name = "smart-budget")]
#[command(about = "Monthly budget tracker with financial insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the configured or platform data path)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.local/share/smart-budget/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a transaction
    Add {
        /// What the money was for
        title: String,

        /// Amount (positive)
        amount: f64,

        /// Transaction type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        tx_type: String,

        /// Category (defaults to Other)
        #[arg(short, long)]
        category: Option<String>,

        /// Month (YYYY-MM, defaults to the current view month)
        #[arg(short, long)]
        month: Option<String>,

        /// Day of month to file it under
        #[arg(short, long)]
        day: Option<u32>,
    },

    /// List a month's transactions grouped by day
    List {
        /// Month (YYYY-MM, defaults to the current view month)
        #[arg(short, long)]
        month: Option<String>,

        /// Only show this day of the month
        #[arg(short, long)]
        day: Option<u32>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Budget limit management
    Budget {
        #[command(subcommand)]
        action: BudgetCommands,
    },

    /// Month overview: totals, budget, health, breakdown, insights
    Summary {
        /// Month (YYYY-MM, defaults to the current view month)
        #[arg(short, long)]
        month: Option<String>,

        /// Day filter for the timeline
        #[arg(short, long)]
        day: Option<u32>,

        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rule-based insights for a month
    Insights {
        /// Month (YYYY-MM, defaults to the current view month)
        #[arg(short, long)]
        month: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Financial health score for a month
    Health {
        /// Month (YYYY-MM, defaults to the current view month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Expense breakdown by category
    Breakdown {
        /// Month (YYYY-MM, defaults to the current view month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Ask the AI backend for a budgeting tip
    Tip {
        /// Month (YYYY-MM, defaults to the current view month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List stored months
    Months,

    /// Export a JSON backup of every month, or one month as CSV
    Export {
        /// Output file (defaults to budget_backup_YYYY-MM-DD.json, or stdout for --csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export this month's transactions as CSV instead
        #[arg(long, value_name = "MONTH")]
        csv: Option<String>,
    },

    /// Replace all data with a JSON backup
    Import {
        /// Backup file
        file: PathBuf,
    },

    /// Show or change view settings
    Settings {
        /// Dark mode on or off
        #[arg(long)]
        dark_mode: Option<bool>,

        /// Switch the current month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Move the current month by N months (negative goes back)
        #[arg(long, allow_hyphen_values = true)]
        shift: Option<i32>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Directory with front-end files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the month's spending limit (0 clears it)
    Set {
        /// Limit amount
        limit: f64,

        /// Month (YYYY-MM, defaults to the current view month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show budget progress
    Show {
        /// Month (YYYY-MM, defaults to the current view month)
        #[arg(short, long)]
        month: Option<String>,
    },
}
