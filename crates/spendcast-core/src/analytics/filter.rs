//! Expense filter builder
//!
//! Turns a date-range selector and a category selector into a predicate over
//! expense records. Relative ranges are resolved against a reference date the
//! caller passes in, never against the system clock.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Category, Expense, YearMonth};

/// Which dates an expense may fall on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    AllTime,
    /// On or after the reference date minus `n` days
    LastNDays(u32),
    CalendarMonth(YearMonth),
}

impl DateRange {
    /// Returns None unless `month` is 1-12
    pub fn calendar_month(year: i32, month: u32) -> Option<Self> {
        YearMonth::new(year, month).map(Self::CalendarMonth)
    }

    /// Resolve a period selector
    ///
    /// Accepts `all`, `this-month`, `last-month`, `last-<n>-days` and
    /// `YYYY-MM`. The month-relative selectors are pinned to `today` here.
    pub fn parse_period(period: &str, today: NaiveDate) -> Result<Self> {
        let period = period.trim().to_lowercase();
        match period.as_str() {
            "all" | "all-time" => return Ok(Self::AllTime),
            "this-month" => return Ok(Self::CalendarMonth(YearMonth::from_date(today))),
            "last-month" => {
                let first = today.with_day(1).unwrap_or(today);
                let previous = first.pred_opt().unwrap_or(first);
                return Ok(Self::CalendarMonth(YearMonth::from_date(previous)));
            }
            _ => {}
        }

        if let Some(days) = period
            .strip_prefix("last-")
            .and_then(|rest| rest.strip_suffix("-days"))
        {
            return days
                .parse::<u32>()
                .map(Self::LastNDays)
                .map_err(|_| {
                    Error::Validation(format!("Invalid day count in period: {}", period))
                });
        }

        period.parse::<YearMonth>().map(Self::CalendarMonth).map_err(|_| {
            Error::Validation(format!(
                "Unknown period: {}. Available: all, this-month, last-month, \
                 last-<n>-days, YYYY-MM",
                period
            ))
        })
    }

    fn matches(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Self::AllTime => true,
            Self::LastNDays(n) => match reference.checked_sub_days(Days::new(u64::from(*n))) {
                Some(start) => date >= start,
                None => true,
            },
            Self::CalendarMonth(month) => month.contains(date),
        }
    }
}

/// Which category an expense must carry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Exactly(Category),
}

impl CategoryFilter {
    /// `None` or the literal selector `All` match everything
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(str::trim) {
            None | Some("") | Some("All") => Self::All,
            Some(label) => Self::Exactly(Category::from(label)),
        }
    }

    fn matches(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::Exactly(wanted) => wanted.as_str() == category.as_str(),
        }
    }
}

/// Builder for expense filters
#[derive(Debug, Clone, Default)]
pub struct ExpenseQuery {
    pub date_range: DateRange,
    pub category: CategoryFilter,
}

impl ExpenseQuery {
    /// Create a new filter builder that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set date range filter
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Set category filter
    pub fn category(mut self, filter: CategoryFilter) -> Self {
        self.category = filter;
        self
    }

    /// Build the predicate, resolving relative ranges against `reference`
    pub fn build(self, reference: NaiveDate) -> ExpensePredicate {
        ExpensePredicate {
            date_range: self.date_range,
            category: self.category,
            reference,
        }
    }
}

/// A date filter AND a category filter, pinned to a reference date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpensePredicate {
    pub date_range: DateRange,
    pub category: CategoryFilter,
    pub reference: NaiveDate,
}

impl ExpensePredicate {
    pub fn matches(&self, expense: &Expense) -> bool {
        self.date_range.matches(expense.date, self.reference)
            && self.category.matches(&expense.category)
    }

    /// Keep matching expenses, preserving their order
    pub fn apply(&self, expenses: impl IntoIterator<Item = Expense>) -> Vec<Expense> {
        expenses.into_iter().filter(|e| self.matches(e)).collect()
    }
}
