//! Export of stored expenses
//!
//! Supports:
//! - CSV with a `Date,Amount,Category` header, one row per expense
//! - A plain-text report, one `<date>: $<amount> (<category>)` line per expense
//!
//! Both list expenses in store order.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::db::ExpenseStore;
use crate::error::{Error, Result};
use crate::models::Expense;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Report,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Report => "report",
        }
    }

    /// File name used when no output path is given
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Csv => "expenses.csv",
            Self::Report => "expenses_report.txt",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "report" | "txt" => Ok(Self::Report),
            _ => Err(format!("Unknown export format: {} (valid: csv, report)", s)),
        }
    }
}

/// Write expenses as CSV
pub fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Date", "Amount", "Category"])?;
    for expense in expenses {
        wtr.write_record([
            expense.date.to_string(),
            format!("{:.2}", expense.amount),
            expense.category.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// One line per expense under an `Expense Report` title
pub fn render_report(expenses: &[Expense]) -> String {
    let mut report = String::from("Expense Report\n\n");
    for expense in expenses {
        report.push_str(&format!(
            "{}: ${:.2} ({})\n",
            expense.date, expense.amount, expense.category
        ));
    }
    report
}

fn render(expenses: &[Expense], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(expenses, &mut buf)?;
            String::from_utf8(buf).map_err(|e| Error::Validation(e.to_string()))
        }
        ExportFormat::Report => Ok(render_report(expenses)),
    }
}

/// Render every stored expense in `format`
pub fn export_expenses<S: ExpenseStore + ?Sized>(
    store: &S,
    format: ExportFormat,
) -> Result<String> {
    render(&store.list_expenses()?, format)
}

/// Export every stored expense to `path`, returning how many were written
pub fn export_to_file<S: ExpenseStore + ?Sized>(
    store: &S,
    format: ExportFormat,
    path: &Path,
) -> Result<usize> {
    let expenses = store.list_expenses()?;
    fs::write(path, render(&expenses, format)?)?;

    info!(
        "Exported {} expenses as {} to {}",
        expenses.len(),
        format.as_str(),
        path.display()
    );
    Ok(expenses.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::NewExpense;

    fn seeded_db() -> Database {
        let db = Database::in_memory().unwrap();
        for (date, amount, category) in [
            ("2025-02-10", "200", "Food"),
            ("2025-01-15", "100.5", "Eating out, weekends"),
            ("2025-01-20", "50", "Rent"),
        ] {
            db.insert_expense(&NewExpense::parse(date, amount, category).unwrap())
                .unwrap();
        }
        db
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("report".parse::<ExportFormat>().unwrap(), ExportFormat::Report);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_csv_header_and_store_order() {
        let db = seeded_db();
        let csv = export_expenses(&db, ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Amount,Category");
        assert_eq!(lines[1], "2025-02-10,200.00,Food");
        // Category with a comma is quoted
        assert_eq!(lines[2], "2025-01-15,100.50,\"Eating out, weekends\"");
        assert_eq!(lines[3], "2025-01-20,50.00,Rent");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_csv_empty_store_has_header_only() {
        let db = Database::in_memory().unwrap();
        let csv = export_expenses(&db, ExportFormat::Csv).unwrap();
        assert_eq!(csv, "Date,Amount,Category\n");
    }

    #[test]
    fn test_report_lines() {
        let db = seeded_db();
        let report = export_expenses(&db, ExportFormat::Report).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Expense Report");
        assert_eq!(lines[2], "2025-02-10: $200.00 (Food)");
        assert_eq!(lines[3], "2025-01-15: $100.50 (Eating out, weekends)");
        assert_eq!(lines[4], "2025-01-20: $50.00 (Rent)");
    }

    #[test]
    fn test_export_to_file_counts_rows() {
        let db = seeded_db();
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("out.csv");
        assert_eq!(export_to_file(&db, ExportFormat::Csv, &csv_path).unwrap(), 3);
        assert!(fs::read_to_string(&csv_path).unwrap().starts_with("Date,Amount,Category"));

        let report_path = dir.path().join("out.txt");
        assert_eq!(export_to_file(&db, ExportFormat::Report, &report_path).unwrap(), 3);
    }
}
