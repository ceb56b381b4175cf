//! Spendcast Core Library
//!
//! Shared functionality for the Spendcast expense tracker:
//! - SQLite expense store with pooled, per-operation connections
//! - Expense filters (date range and category)
//! - Category breakdowns and monthly totals
//! - Least-squares spending forecasts
//! - CSV and plain-text export
//! - Layered TOML configuration

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;

pub use analytics::{
    AnalyticsReport, CategoryFilter, DateRange, ExpensePredicate, ExpenseQuery, Forecast,
    LinearTrend,
};
pub use config::Settings;
pub use db::{Database, ExpenseStore};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use models::{
    Category, CategoryBreakdown, Expense, ExpenseSummary, ForecastPoint, MonthlySeries,
    NewExpense, YearMonth,
};
