//! Category and monthly aggregation

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{CategoryBreakdown, Expense, ExpenseSummary, MonthlySeries, YearMonth};

/// Sum amounts per category present in `expenses`
pub fn breakdown_by_category(expenses: &[Expense]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for expense in expenses {
        breakdown.add(&expense.category, expense.amount);
    }
    debug!(
        "Breakdown: {} expenses across {} categories",
        expenses.len(),
        breakdown.len()
    );
    breakdown
}

/// Sum amounts per calendar month, oldest month first
///
/// Months without expenses are left out rather than zero-filled.
pub fn monthly_totals(expenses: &[Expense]) -> MonthlySeries {
    let mut buckets: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for expense in expenses {
        *buckets.entry(YearMonth::from_date(expense.date)).or_insert(0.0) += expense.amount;
    }
    debug!("Monthly totals: {} active months", buckets.len());
    MonthlySeries::from_totals(buckets)
}

pub fn summarize(expenses: &[Expense]) -> ExpenseSummary {
    if expenses.is_empty() {
        return ExpenseSummary::default();
    }

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    ExpenseSummary {
        total,
        count: expenses.len(),
        average: total / expenses.len() as f64,
        first_date: expenses.iter().map(|e| e.date).min(),
        last_date: expenses.iter().map(|e| e.date).max(),
    }
}
