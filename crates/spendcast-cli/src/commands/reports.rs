//! Report command implementations
//!
//! Each report renders to a `String` so the layout can be tested; the
//! `cmd_report_*` wrappers load the data and print it.

use std::fmt::Write as _;

use anyhow::Result;
use spendcast_core::analytics::MIN_OBSERVATIONS;
use spendcast_core::{
    AnalyticsReport, CategoryFilter, Database, DateRange, ExpensePredicate, Forecast,
};

use super::{money, truncate};

/// Width of the longest bar in the trends chart
const BAR_WIDTH: usize = 30;

const RULE: &str = "   ─────────────────────────────────────────────────────────────";

/// Human-readable description of the active filters
fn describe_filter(predicate: &ExpensePredicate) -> String {
    let period = match predicate.date_range {
        DateRange::AllTime => "all time".to_string(),
        DateRange::LastNDays(n) => match predicate
            .reference
            .checked_sub_days(chrono::Days::new(u64::from(n)))
        {
            Some(start) => format!("last {} days (since {})", n, start),
            None => format!("last {} days", n),
        },
        DateRange::CalendarMonth(month) => month.to_string(),
    };
    match &predicate.category {
        CategoryFilter::All => period,
        CategoryFilter::Exactly(category) => format!("{}, {} only", period, category),
    }
}

fn header(out: &mut String, title: &str, report: &AnalyticsReport) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "   Filter: {}", describe_filter(&report.filter))?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn print_json(report: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn render_summary(report: &AnalyticsReport) -> Result<String> {
    let mut out = String::new();
    header(&mut out, "📊 Expense Summary", report)?;

    let summary = &report.summary;
    if summary.count == 0 {
        writeln!(out, "   No expenses found for this filter.")?;
        return Ok(out);
    }

    writeln!(out, "   Total:        {}", money(summary.total))?;
    writeln!(out, "   Expenses:     {}", summary.count)?;
    writeln!(out, "   Average:      {}", money(summary.average))?;
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        writeln!(out, "   Span:         {} to {}", first, last)?;
    }
    writeln!(out, "   Categories:   {}", report.breakdown.len())?;
    writeln!(out, "   Active months: {}", report.monthly.len())?;

    Ok(out)
}

pub fn render_breakdown(report: &AnalyticsReport) -> Result<String> {
    let mut out = String::new();
    header(&mut out, "🥧 Expense Breakdown by Category", report)?;

    let ranked = report.breakdown.ranked();
    if ranked.is_empty() {
        writeln!(out, "   No expenses found for this filter.")?;
        return Ok(out);
    }

    writeln!(out, "   Total: {}", money(report.breakdown.total()))?;
    writeln!(out)?;
    writeln!(out, "   {:25} │ {:>12} │ {:>6}", "Category", "Amount", "%")?;
    writeln!(out, "   ──────────────────────────┼──────────────┼────────")?;

    for share in &ranked {
        writeln!(
            out,
            "   {:25} │ {:>12} │ {:>5.1}%",
            truncate(share.category.as_str(), 25),
            money(share.amount),
            share.percentage
        )?;
    }

    Ok(out)
}

pub fn render_trends(report: &AnalyticsReport) -> Result<String> {
    let mut out = String::new();
    header(&mut out, "📈 Monthly Spending", report)?;

    if report.monthly.is_empty() {
        writeln!(out, "   No spending data found.")?;
        return Ok(out);
    }

    let max = report.monthly.totals().fold(0.0_f64, f64::max);

    writeln!(out, "   {:8} │ {:>12} │", "Month", "Amount")?;
    writeln!(out, "   ─────────┼──────────────┼───────────────────────────────")?;

    for point in report.monthly.points() {
        let bar_len = if max > 0.0 {
            ((point.total / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        writeln!(
            out,
            "   {:8} │ {:>12} │ {}",
            point.month.to_string(),
            money(point.total),
            "█".repeat(bar_len)
        )?;
    }

    Ok(out)
}

pub fn render_forecast(report: &AnalyticsReport, horizon: usize) -> Result<String> {
    let mut out = String::new();
    let title = format!("🔮 Expense Predictions (Next {} Months)", horizon);
    header(&mut out, &title, report)?;

    let trend = match &report.forecast {
        Forecast::Projected { trend, .. } => *trend,
        Forecast::InsufficientData { observed } => {
            writeln!(out, "   Insufficient data for predictions.")?;
            writeln!(
                out,
                "   Need expenses in at least {} different months; found {}.",
                MIN_OBSERVATIONS, observed
            )?;
            return Ok(out);
        }
    };

    let labeled = report.forecast.labeled_points(report.monthly.last_month());
    let labels: Vec<String> = labeled
        .iter()
        .map(|(_, point)| format!("Month +{}", point.offset))
        .collect();
    let kind_width = labels
        .iter()
        .map(String::len)
        .chain(std::iter::once("history".len()))
        .max()
        .unwrap_or(0);

    writeln!(
        out,
        "   Trend: {}/month, fitted over {} active months",
        money(trend.slope),
        report.monthly.len()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "   {:10} │ {:kw$} │ {:>12} │ {:>12}",
        "Month",
        "Kind",
        "Actual",
        "Trend",
        kw = kind_width
    )?;
    writeln!(
        out,
        "   ───────────┼─{}─┼──────────────┼──────────────",
        "─".repeat(kind_width)
    )?;

    for (i, point) in report.monthly.points().iter().enumerate() {
        writeln!(
            out,
            "   {:10} │ {:kw$} │ {:>12} │ {:>12}",
            point.month.to_string(),
            "history",
            money(point.total),
            money(trend.value_at(i as f64)),
            kw = kind_width
        )?;
    }

    for ((month, point), label) in labeled.iter().zip(&labels) {
        writeln!(
            out,
            "   {:10} │ {:kw$} │ {:>12} │ {:>12}",
            month.map(|m| m.to_string()).unwrap_or_default(),
            label,
            "",
            money(point.amount),
            kw = kind_width
        )?;
    }

    if report.monthly.len() < report.monthly.calendar_span() {
        writeln!(out)?;
        writeln!(
            out,
            "   Note: months without expenses are skipped, so the trend treats \
             {} active months as consecutive.",
            report.monthly.len()
        )?;
    }

    Ok(out)
}

pub fn cmd_report_summary(db: &Database, predicate: &ExpensePredicate, json: bool) -> Result<()> {
    let report = AnalyticsReport::build(db, predicate, 0)?;
    if json {
        return print_json(&report.summary);
    }
    print!("{}", render_summary(&report)?);
    Ok(())
}

pub fn cmd_report_breakdown(
    db: &Database,
    predicate: &ExpensePredicate,
    json: bool,
) -> Result<()> {
    let report = AnalyticsReport::build(db, predicate, 0)?;
    if json {
        return print_json(&report.breakdown.ranked());
    }
    print!("{}", render_breakdown(&report)?);
    Ok(())
}

pub fn cmd_report_trends(db: &Database, predicate: &ExpensePredicate, json: bool) -> Result<()> {
    let report = AnalyticsReport::build(db, predicate, 0)?;
    if json {
        return print_json(&report.monthly);
    }
    print!("{}", render_trends(&report)?);
    Ok(())
}

pub fn cmd_report_forecast(
    db: &Database,
    predicate: &ExpensePredicate,
    horizon: usize,
    json: bool,
) -> Result<()> {
    let report = AnalyticsReport::build(db, predicate, horizon)?;
    if json {
        return print_json(&report.forecast);
    }
    print!("{}", render_forecast(&report, horizon)?);
    Ok(())
}
