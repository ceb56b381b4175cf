//! Spendcast CLI - Personal expense tracker
//!
//! Usage:
//!   spendcast init                        Initialize database
//!   spendcast add 12.50 Food              Record an expense
//!   spendcast report breakdown            Spending by category
//!   spendcast report forecast             Project the next months
//!   spendcast export --format csv         Export all expenses

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use spendcast_core::Settings;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
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
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let settings = Settings::load(cli.config.as_deref())?;
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| settings.database_path.clone());
    debug!("Using database {}", db_path.display());

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Config => commands::cmd_config(&settings, &db_path),
        Commands::Add {
            amount,
            category,
            date,
        } => {
            let db = commands::open_db(&db_path)?;
            let date = date.unwrap_or_else(|| commands::today().to_string());
            commands::cmd_add(&db, &date, &amount, &category, &settings.category_labels)
                .map(|_| ())
        }
        Commands::List { filter, limit } => {
            let db = commands::open_db(&db_path)?;
            let predicate = commands::resolve_filter(&filter, &settings, commands::today())?;
            commands::cmd_list(&db, &predicate, limit)
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_delete(&db, id)
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&db_path)?;
            let today = commands::today();
            match report_type {
                ReportType::Summary { filter, json } => {
                    let predicate = commands::resolve_filter(&filter, &settings, today)?;
                    commands::cmd_report_summary(&db, &predicate, json)
                }
                ReportType::Breakdown { filter, json } => {
                    let predicate = commands::resolve_filter(&filter, &settings, today)?;
                    commands::cmd_report_breakdown(&db, &predicate, json)
                }
                ReportType::Trends { filter, json } => {
                    let predicate = commands::resolve_filter(&filter, &settings, today)?;
                    commands::cmd_report_trends(&db, &predicate, json)
                }
                ReportType::Forecast {
                    filter,
                    horizon,
                    json,
                } => {
                    let predicate = commands::resolve_filter(&filter, &settings, today)?;
                    let horizon = horizon.unwrap_or(settings.forecast_horizon);
                    commands::cmd_report_forecast(&db, &predicate, horizon, json)
                }
            }
        }
        Commands::Export { format, output } => {
            let db = commands::open_db(&db_path)?;
            let format: spendcast_core::ExportFormat =
                format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            commands::cmd_export(&db, format, output.as_deref()).map(|_| ())
        }
    }
}
