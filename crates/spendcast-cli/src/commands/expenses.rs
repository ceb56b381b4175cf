//! Expense command implementations

use anyhow::{Context, Result};
use spendcast_core::{Database, ExpensePredicate, ExpenseStore, NewExpense};

use super::{money, truncate};

/// Validate and record an expense, returning its ID
///
/// `labels` are the configured category labels; any other label is still
/// accepted but gets a hint in case it was a typo.
pub fn cmd_add(
    db: &Database,
    date: &str,
    amount: &str,
    category: &str,
    labels: &[String],
) -> Result<i64> {
    let expense = NewExpense::parse(date, amount, category)?;
    let id = db.insert_expense(&expense).context("Failed to save expense")?;

    println!(
        "✅ Added expense #{}: {} {} ({})",
        id,
        expense.date,
        money(expense.amount),
        expense.category
    );
    if let Some(hint) = category_hint(expense.category.as_str(), labels) {
        println!("{}", hint);
    }
    Ok(id)
}

/// Hint shown when `category` is not one of the configured labels
pub fn category_hint(category: &str, labels: &[String]) -> Option<String> {
    if labels.is_empty() || labels.iter().any(|l| l == category) {
        return None;
    }
    Some(format!(
        "   Note: \"{}\" is a new category (configured: {})",
        category,
        labels.join(", ")
    ))
}

pub fn cmd_list(db: &Database, predicate: &ExpensePredicate, limit: usize) -> Result<()> {
    let mut expenses = predicate.apply(db.list_expenses()?);

    if expenses.is_empty() {
        println!("No expenses found. Add one with:");
        println!("  spendcast add 12.50 Food");
        return Ok(());
    }

    let matched = expenses.len();
    expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    expenses.truncate(limit);

    println!();
    println!("📝 Expenses ({} of {} shown)", expenses.len(), matched);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:>5} │ {:10} │ {:>10} │ Category", "ID", "Date", "Amount");
    println!("   ──────┼────────────┼────────────┼──────────────────────");

    for expense in expenses {
        println!(
            "   {:>5} │ {} │ {:>10} │ {}",
            expense.id,
            expense.date,
            money(expense.amount),
            truncate(expense.category.as_str(), 30)
        );
    }

    Ok(())
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    let expense = db
        .get_expense(id)?
        .with_context(|| format!("Expense #{} not found", id))?;

    db.delete_expense(id)?;
    println!(
        "🗑️  Deleted expense #{}: {} {} ({})",
        id,
        expense.date,
        money(expense.amount),
        expense.category
    );
    Ok(())
}
