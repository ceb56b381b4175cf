//! Expense record operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

use super::{Database, ExpenseStore};
use crate::error::{Error, Result};
use crate::models::{Category, Expense, NewExpense};

impl ExpenseStore for Database {
    fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO expenses (date, amount, category) VALUES (?, ?, ?)",
            params![
                expense.date.to_string(),
                expense.amount,
                expense.category.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(
            "Recorded expense #{}: {} {:.2} ({})",
            id, expense.date, expense.amount, expense.category
        );
        Ok(id)
    }

    fn list_expenses(&self) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, date, amount, category FROM expenses ORDER BY id")?;

        let expenses = stmt
            .query_map([], Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Loaded {} expenses", expenses.len());
        Ok(expenses)
    }
}

impl Database {
    /// Helper to convert a row to Expense
    /// Column order: id, date, amount, category
    pub(crate) fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
        let date_str: String = row.get(1)?;
        let category: String = row.get(3)?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;
        Ok(Expense {
            id: row.get(0)?,
            date,
            amount: row.get(2)?,
            category: Category::from(category),
        })
    }

    /// Get a single expense by ID
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                "SELECT id, date, amount, category FROM expenses WHERE id = ?",
                params![id],
                Self::row_to_expense,
            )
            .optional()?;
        Ok(expense)
    }

    /// Remove an expense; errors with `NotFound` if the id does not exist
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("expense #{}", id)));
        }
        info!("Deleted expense #{}", id);
        Ok(())
    }

    /// Count stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }
}
