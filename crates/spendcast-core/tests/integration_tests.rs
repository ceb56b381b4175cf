//! Integration tests for spendcast-core
//!
//! These tests exercise the full store → filter → aggregate → forecast workflow.

use chrono::NaiveDate;
use spendcast_core::{
    analytics::{breakdown_by_category, forecast, monthly_totals},
    export::{export_expenses, ExportFormat},
    AnalyticsReport, Category, CategoryFilter, Database, DateRange, Error, ExpenseQuery,
    ExpenseStore, Forecast, MonthlySeries, NewExpense, YearMonth,
};

fn add(db: &Database, date: &str, amount: &str, category: &str) -> i64 {
    db.insert_expense(&NewExpense::parse(date, amount, category).expect("valid expense"))
        .expect("insert")
}

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

// =============================================================================
// Pipeline Integration Tests
// =============================================================================

#[test]
fn test_three_record_scenario() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    add(&db, "2025-01-15", "100", "Food");
    add(&db, "2025-01-20", "50", "Rent");
    add(&db, "2025-02-10", "200", "Food");

    let all = db.list_expenses().unwrap();

    let breakdown = breakdown_by_category(&all);
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown.get(&Category::Food), Some(300.0));
    assert_eq!(breakdown.get(&Category::Rent), Some(50.0));

    let monthly = monthly_totals(&all);
    let pairs: Vec<(String, f64)> = monthly
        .points()
        .iter()
        .map(|p| (p.month.to_string(), p.total))
        .collect();
    assert_eq!(
        pairs,
        vec![("2025-01".to_string(), 150.0), ("2025-02".to_string(), 200.0)]
    );

    let january = ExpenseQuery::new()
        .date_range(DateRange::calendar_month(2025, 1).unwrap())
        .build(reference_date());
    let matched = january.apply(all.clone());
    assert_eq!(matched, all[..2].to_vec());
}

#[test]
fn test_forecast_scenario() {
    let series = MonthlySeries::from_totals(vec![
        (YearMonth::new(2025, 1).unwrap(), 100.0),
        (YearMonth::new(2025, 2).unwrap(), 200.0),
        (YearMonth::new(2025, 3).unwrap(), 300.0),
    ]);

    let points = forecast(&series, 2).unwrap();
    let pairs: Vec<(usize, f64)> = points.iter().map(|p| (p.offset, p.amount)).collect();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0, 1);
    assert!((pairs[0].1 - 400.0).abs() < 1e-9);
    assert_eq!(pairs[1].0, 2);
    assert!((pairs[1].1 - 500.0).abs() < 1e-9);
}

#[test]
fn test_report_over_database() {
    let db = Database::in_memory().unwrap();
    add(&db, "2025-03-02", "40", "Food");
    add(&db, "2025-03-18", "900", "Rent");
    add(&db, "2025-04-07", "60", "Food");
    add(&db, "2025-05-21", "80", "Food");
    add(&db, "2025-05-22", "15", "Entertainment");

    let food_only = ExpenseQuery::new()
        .category(CategoryFilter::Exactly(Category::Food))
        .build(reference_date());
    let report = AnalyticsReport::build(&db, &food_only, 1).unwrap();

    assert_eq!(report.summary.count, 3);
    assert_eq!(report.summary.total, 180.0);
    assert_eq!(report.breakdown.len(), 1);

    match report.forecast {
        Forecast::Projected { trend, points } => {
            assert!((trend.slope - 20.0).abs() < 1e-9);
            assert!((points[0].amount - 100.0).abs() < 1e-9);
        }
        other => panic!("expected projection, got {other:?}"),
    }
}

#[test]
fn test_insufficient_data_is_reported_not_raised() {
    let db = Database::in_memory().unwrap();
    add(&db, "2025-06-01", "12", "Food");

    let report =
        AnalyticsReport::build(&db, &ExpenseQuery::new().build(reference_date()), 3).unwrap();
    assert_eq!(report.forecast, Forecast::InsufficientData { observed: 1 });

    let err = forecast(&report.monthly, 3).unwrap_err();
    assert!(matches!(err, Error::InsufficientData { observed: 1, .. }));
}

#[test]
fn test_invalid_input_never_reaches_store() {
    let db = Database::in_memory().unwrap();
    assert!(NewExpense::parse("2025-13-01", "10", "Food").is_err());
    assert!(NewExpense::parse("2025-01-01", "-10", "Food").is_err());
    assert!(NewExpense::parse("2025-01-01", "10", "").is_err());
    assert_eq!(db.count_expenses().unwrap(), 0);
}

#[test]
fn test_export_matches_store_order() {
    let db = Database::in_memory().unwrap();
    add(&db, "2025-02-01", "5", "Other");
    add(&db, "2025-01-01", "7.25", "Food");

    let csv = export_expenses(&db, ExportFormat::Csv).unwrap();
    assert_eq!(
        csv,
        "Date,Amount,Category\n2025-02-01,5.00,Other\n2025-01-01,7.25,Food\n"
    );
}
