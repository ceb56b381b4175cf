//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and config commands, shared utilities (open_db, resolve_filter)
//! - `expenses` - Expense commands (add, list, delete)
//! - `reports` - Report generation commands (summary, breakdown, trends, forecast)
//! - `export` - CSV and text report export

pub mod core;
pub mod expenses;
pub mod export;
pub mod reports;

// Re-export command functions for main.rs
pub use self::core::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount as dollars, keeping the sign in front
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}
