//! Domain models for Spendcast

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A persisted expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Category,
}

/// A validated expense waiting to be inserted
///
/// Only [`NewExpense::parse`] builds one from raw input, so anything that
/// reaches the store has a real date, a positive amount and a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Category,
}

impl NewExpense {
    /// Validate raw entry-form input
    pub fn parse(date: &str, amount: &str, category: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            Error::Validation("Date must be in YYYY-MM-DD format.".to_string())
        })?;

        let amount = parse_amount(amount.trim()).ok_or_else(|| {
            Error::Validation("Amount must be a positive number.".to_string())
        })?;

        let category = category.trim();
        if category.is_empty() {
            return Err(Error::Validation("Please select a category.".to_string()));
        }

        Ok(Self {
            date,
            amount,
            category: Category::from(category),
        })
    }
}

/// Plain decimal with at most one point, no sign or exponent, strictly positive
fn parse_amount(raw: &str) -> Option<f64> {
    let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
    let points = raw.chars().filter(|c| *c == '.').count();
    if digits == 0 || points > 1 || digits + points != raw.len() {
        return None;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Expense category
///
/// The named variants are the labels offered by the entry form. Anything
/// else is kept verbatim in `Custom`. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Category {
    Food,
    Rent,
    Entertainment,
    Other,
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Rent => "Rent",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
            Self::Custom(label) => label,
        }
    }

    /// The fixed labels, in entry-form order
    pub fn presets() -> &'static [Category] {
        &[Self::Food, Self::Rent, Self::Entertainment, Self::Other]
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "Food" => Self::Food,
            "Rent" => Self::Rent,
            "Entertainment" => Self::Entertainment,
            "Other" => Self::Other,
            _ => Self::Custom(s.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Custom(_) => Self::Custom(s),
            preset => preset,
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Custom(label) => label,
            preset => preset.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========== Report Models ==========

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns None unless `month` is 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Calendar months from `self` to `later`; negative if `later` is earlier
    pub fn months_until(&self, later: YearMonth) -> i64 {
        (later.year as i64 - self.year as i64) * 12 + later.month as i64 - self.month as i64
    }

    /// Month `n` months after this one
    pub fn add_months(&self, n: u32) -> Self {
        let zero_based = self.year as i64 * 12 + (self.month as i64 - 1) + n as i64;
        Self {
            year: zero_based.div_euclid(12) as i32,
            month: zero_based.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || format!("Invalid month: {} (expected YYYY-MM)", s);
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Total spending in one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: f64,
}

/// Monthly totals in strictly ascending month order
///
/// Months without activity are absent, so a position in the series is not a
/// calendar distance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlySeries {
    points: Vec<MonthlyTotal>,
}

impl MonthlySeries {
    /// Build a series from (month, total) pairs in any order
    ///
    /// Pairs that share a month are summed into one entry.
    pub fn from_totals(totals: impl IntoIterator<Item = (YearMonth, f64)>) -> Self {
        let mut points: Vec<MonthlyTotal> = totals
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect();
        points.sort_by_key(|p| p.month);
        points.dedup_by(|later, earlier| {
            if later.month == earlier.month {
                earlier.total += later.total;
                true
            } else {
                false
            }
        });
        Self { points }
    }

    pub fn points(&self) -> &[MonthlyTotal] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_month(&self) -> Option<YearMonth> {
        self.points.first().map(|p| p.month)
    }

    pub fn last_month(&self) -> Option<YearMonth> {
        self.points.last().map(|p| p.month)
    }

    /// Calendar months from the first to the last entry, inclusive
    ///
    /// Larger than `len()` when some months in between had no activity.
    pub fn calendar_span(&self) -> usize {
        match (self.first_month(), self.last_month()) {
            (Some(first), Some(last)) => first.months_until(last) as usize + 1,
            _ => 0,
        }
    }

    pub fn totals(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.total)
    }
}

/// Spending per category, independent of time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryBreakdown {
    totals: HashMap<Category, f64>,
}

impl CategoryBreakdown {
    pub fn add(&mut self, category: &Category, amount: f64) {
        *self.totals.entry(category.clone()).or_insert(0.0) += amount;
    }

    pub fn get(&self, category: &Category) -> Option<f64> {
        self.totals.get(category).copied()
    }

    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Categories by amount (largest first) with their share of the total
    pub fn ranked(&self) -> Vec<CategoryShare> {
        let total = self.total();
        let mut shares: Vec<CategoryShare> = self
            .totals
            .iter()
            .map(|(category, amount)| CategoryShare {
                category: category.clone(),
                amount: *amount,
                percentage: if total > 0.0 {
                    (amount / total) * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        shares.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });
        shares
    }
}

/// One category row of a ranked breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: f64,
    pub percentage: f64,
}

/// Headline numbers for a set of expenses
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub count: usize,
    pub average: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// A projected monthly total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Months after the last observed month, starting at 1
    pub offset: usize,
    /// Not clamped; a falling trend can project below zero
    pub amount: f64,
}
