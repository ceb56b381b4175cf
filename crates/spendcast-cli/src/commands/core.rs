//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `resolve_filter` - Turn --period/--category into a predicate
//! - `cmd_init` - Initialize the database
//! - `cmd_config` - Show resolved configuration

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendcast_core::{
    CategoryFilter, Database, DateRange, ExpensePredicate, ExpenseQuery, Settings,
};

use crate::cli::FilterArgs;

/// Open the database, creating the schema if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    Database::new(path_str).context("Failed to open database")
}

/// Local calendar date, read once per command
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Build the expense predicate for a command
///
/// `--period` falls back to `filters.default_period` from config.
pub fn resolve_filter(
    args: &FilterArgs,
    settings: &Settings,
    today: NaiveDate,
) -> Result<ExpensePredicate> {
    let period = args.period.as_deref().unwrap_or(&settings.default_period);
    let date_range = DateRange::parse_period(period, today)?;

    Ok(ExpenseQuery::new()
        .date_range(date_range)
        .category(CategoryFilter::from_selector(args.category.as_deref()))
        .build(today))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_expenses()?;

    println!("✅ Database ready ({} expenses stored)", count);
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: spendcast add 12.50 Food --date 2025-01-15");
    println!("  2. See where it goes: spendcast report breakdown");
    println!("  3. Look ahead:        spendcast report forecast");

    Ok(())
}

pub fn cmd_config(settings: &Settings, db_path: &Path) -> Result<()> {
    println!();
    println!("⚙️  Spendcast Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    match &settings.source {
        Some(path) => println!("   Config file:      {}", path.display()),
        None => println!("   Config file:      (built-in defaults)"),
    }
    println!("   Database:         {}", db_path.display());
    println!("   Forecast horizon: {} months", settings.forecast_horizon);
    println!("   Default period:   {}", settings.default_period);
    println!("   Categories:       {}", settings.category_labels.join(", "));
    Ok(())
}
