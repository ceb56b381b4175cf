//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Spendcast - Track expenses and forecast monthly spending
#[derive(Parser)]
#[command(name = "spendcast")]
#[command(about = "Personal expense tracker with spending forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides database.path from config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.config/spendcast/config.toml when present)
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

    /// Show resolved configuration
    Config,

    /// Record an expense
    Add {
        /// Amount, a positive number such as 12.50
        amount: String,

        /// Category (categories.labels from config, or any other label)
        category: String,

        /// Date in YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum rows to show (most recent first)
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete an expense by ID
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Spending reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Export all expenses to a file
    Export {
        /// Output format: csv, report
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to expenses.csv / expenses_report.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Filters shared by listing and reports
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Period: all, this-month, last-month, last-<n>-days, or YYYY-MM
    /// (defaults to filters.default_period from config)
    #[arg(short, long)]
    pub period: Option<String>,

    /// Only this category (exact, case-sensitive; "All" for every category)
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Total, count and date span
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spending by category
    Breakdown {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spending per month
    Trends {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project monthly spending from the linear trend
    Forecast {
        #[command(flatten)]
        filter: FilterArgs,

        /// Months to project, at most 120 (defaults to forecast.horizon from config)
        #[arg(long)]
        horizon: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
