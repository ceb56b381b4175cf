//! Expense analytics pipeline
//!
//! Store → filter → aggregate → forecast, run synchronously in one call:
//! - `filter` - date range and category predicates
//! - `aggregate` - category breakdown, monthly totals, headline summary
//! - `forecast` - least-squares trend over monthly totals

pub mod aggregate;
pub mod filter;
pub mod forecast;

use serde::Serialize;
use tracing::{debug, warn};

use crate::db::ExpenseStore;
use crate::error::{Error, Result};
use crate::models::{
    CategoryBreakdown, Expense, ExpenseSummary, ForecastPoint, MonthlySeries, YearMonth,
};

pub use aggregate::{breakdown_by_category, monthly_totals, summarize};
pub use filter::{CategoryFilter, DateRange, ExpensePredicate, ExpenseQuery};
pub use forecast::{
    check_horizon, fit_and_project, forecast, LinearTrend, MAX_HORIZON, MIN_OBSERVATIONS,
};

/// Outcome of forecasting a monthly series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Forecast {
    Projected {
        trend: LinearTrend,
        points: Vec<ForecastPoint>,
    },
    /// Fewer observed months than [`MIN_OBSERVATIONS`]
    InsufficientData { observed: usize },
}

impl Forecast {
    /// Forecast `series`, turning too-short input into an outcome rather than an error
    ///
    /// A horizon above [`MAX_HORIZON`] is still an error.
    pub fn from_series(series: &MonthlySeries, horizon: usize) -> Result<Self> {
        match fit_and_project(series, horizon) {
            Ok((trend, points)) => Ok(Self::Projected { trend, points }),
            Err(Error::InsufficientData { observed, .. }) => {
                warn!(
                    "Skipping forecast: {} month(s) observed, need {}",
                    observed, MIN_OBSERVATIONS
                );
                Ok(Self::InsufficientData { observed })
            }
            Err(e) => Err(e),
        }
    }

    /// Projected points paired with the month each would land in if
    /// activity continued every month after the last observed one
    pub fn labeled_points(
        &self,
        last_month: Option<YearMonth>,
    ) -> Vec<(Option<YearMonth>, ForecastPoint)> {
        match self {
            Self::Projected { points, .. } => points
                .iter()
                .map(|p| {
                    let month = last_month
                        .zip(u32::try_from(p.offset).ok())
                        .map(|(m, n)| m.add_months(n));
                    (month, *p)
                })
                .collect(),
            Self::InsufficientData { .. } => Vec::new(),
        }
    }
}

/// Everything the presentation layer needs for one filtered view
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub filter: ExpensePredicate,
    pub expenses: Vec<Expense>,
    pub summary: ExpenseSummary,
    pub breakdown: CategoryBreakdown,
    pub monthly: MonthlySeries,
    pub forecast: Forecast,
}

impl AnalyticsReport {
    /// Read every record from `store`, filter, aggregate and forecast
    pub fn build<S: ExpenseStore + ?Sized>(
        store: &S,
        predicate: &ExpensePredicate,
        horizon: usize,
    ) -> Result<Self> {
        let expenses = predicate.apply(store.list_expenses()?);
        debug!("{} expenses matched {:?}", expenses.len(), predicate);

        let summary = summarize(&expenses);
        let breakdown = breakdown_by_category(&expenses);
        let monthly = monthly_totals(&expenses);
        let forecast = Forecast::from_series(&monthly, horizon)?;

        Ok(Self {
            filter: predicate.clone(),
            expenses,
            summary,
            breakdown,
            monthly,
            forecast,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Category, NewExpense};

    /// Vec-backed store for exercising the pipeline without SQLite
    #[derive(Default)]
    struct MemoryStore {
        rows: RefCell<Vec<Expense>>,
    }

    impl ExpenseStore for MemoryStore {
        fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
            let mut rows = self.rows.borrow_mut();
            let id = rows.len() as i64 + 1;
            rows.push(Expense {
                id,
                date: expense.date,
                amount: expense.amount,
                category: expense.category.clone(),
            });
            Ok(id)
        }

        fn list_expenses(&self) -> Result<Vec<Expense>> {
            Ok(self.rows.borrow().clone())
        }
    }

    struct BrokenStore;

    impl ExpenseStore for BrokenStore {
        fn insert_expense(&self, _: &NewExpense) -> Result<i64> {
            Err(Error::Io(std::io::Error::other("store offline")))
        }

        fn list_expenses(&self) -> Result<Vec<Expense>> {
            Err(Error::Io(std::io::Error::other("store offline")))
        }
    }

    fn seeded() -> MemoryStore {
        let store = MemoryStore::default();
        for (date, amount, category) in [
            ("2025-01-15", "100", "Food"),
            ("2025-01-20", "50", "Rent"),
            ("2025-02-10", "200", "Food"),
            ("2025-03-05", "250", "Food"),
        ] {
            store
                .insert_expense(&NewExpense::parse(date, amount, category).unwrap())
                .unwrap();
        }
        store
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
    }

    #[test]
    fn test_report_all_time() {
        let store = seeded();
        let predicate = ExpenseQuery::new().build(today());
        let report = AnalyticsReport::build(&store, &predicate, 2).unwrap();

        assert_eq!(report.summary.count, 4);
        assert_eq!(report.breakdown.get(&Category::Food), Some(550.0));
        assert_eq!(report.monthly.len(), 3);

        match report.forecast {
            Forecast::Projected { ref points, .. } => {
                // 150, 200, 250 -> 300, 350
                assert!((points[0].amount - 300.0).abs() < 1e-9);
                assert!((points[1].amount - 350.0).abs() < 1e-9);
            }
            other => panic!("expected projection, got {other:?}"),
        }
    }

    #[test]
    fn test_report_with_one_month_keeps_breakdown() {
        let store = seeded();
        let predicate = ExpenseQuery::new()
            .date_range(DateRange::calendar_month(2025, 1).unwrap())
            .build(today());
        let report = AnalyticsReport::build(&store, &predicate, 3).unwrap();

        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.breakdown.len(), 2);
        assert_eq!(report.forecast, Forecast::InsufficientData { observed: 1 });
        assert!(report.forecast.labeled_points(report.monthly.last_month()).is_empty());
    }

    #[test]
    fn test_labeled_points_continue_from_last_month() {
        let store = seeded();
        let predicate = ExpenseQuery::new().build(today());
        let report = AnalyticsReport::build(&store, &predicate, 2).unwrap();

        let labels: Vec<String> = report
            .forecast
            .labeled_points(report.monthly.last_month())
            .into_iter()
            .map(|(m, _)| m.unwrap().to_string())
            .collect();
        assert_eq!(labels, vec!["2025-04", "2025-05"]);
    }

    #[test]
    fn test_oversized_horizon_is_an_error_even_without_data() {
        let store = MemoryStore::default();
        let predicate = ExpenseQuery::new().build(today());
        let result = AnalyticsReport::build(&store, &predicate, usize::MAX);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_store_failure_propagates() {
        let predicate = ExpenseQuery::new().build(today());
        let result = AnalyticsReport::build(&BrokenStore, &predicate, 3);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_report_serializes_forecast_status() {
        let store = MemoryStore::default();
        let predicate = ExpenseQuery::new().build(today());
        let report = AnalyticsReport::build(&store, &predicate, 3).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["forecast"]["status"], "insufficient_data");
        assert_eq!(json["forecast"]["observed"], 0);
    }
}
