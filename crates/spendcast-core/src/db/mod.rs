//! Database access layer with connection pooling and migrations
//!
//! - `expenses` - Expense record insert, listing and removal
//!
//! Every operation checks a connection out of the pool for its own duration;
//! the connection goes back when the `DbConn` guard drops.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::debug;

use crate::error::Result;
use crate::models::{Expense, NewExpense};

mod expenses;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Durable expense records consumed by the analytics pipeline
///
/// Stores only need to hand back every record; filtering happens in
/// [`crate::analytics`].
pub trait ExpenseStore {
    /// Insert a validated expense, returning its new id
    fn insert_expense(&self, expense: &NewExpense) -> Result<i64>;

    /// All expenses in insertion order
    fn list_expenses(&self) -> Result<Vec<Expense>>;
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the database at `path` and apply the schema
    pub fn new(path: &str) -> Result<Self> {
        // synchronous is per connection; journal_mode persists in the file
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
            Ok(())
        });
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a unique temporary file rather than `:memory:` because every
    /// pooled connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "spendcast_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers see a consistent snapshot while a write is in flight
            PRAGMA journal_mode = WAL;

            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL CHECK (length(category) > 0)
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
            "#,
        )?;

        debug!("Database schema ready at {}", self.db_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_db_is_empty() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_expenses().unwrap().is_empty());
        assert_eq!(db.count_expenses().unwrap(), 0);
    }

    #[test]
    fn test_in_memory_dbs_are_isolated() {
        let a = Database::in_memory().unwrap();
        let b = Database::in_memory().unwrap();
        assert_ne!(a.path(), b.path());

        a.insert_expense(&NewExpense::parse("2025-01-01", "5", "Food").unwrap())
            .unwrap();
        assert_eq!(b.count_expenses().unwrap(), 0);
    }

    #[test]
    fn test_expenses_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('expenses') \
                 WHERE name IN ('id', 'date', 'amount', 'category')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 4, "expenses table should have 4 expected columns");
    }

    #[test]
    fn test_every_pooled_connection_uses_normal_sync() {
        let db = Database::in_memory().unwrap();
        let first = db.conn().unwrap();
        let second = db.conn().unwrap();

        for conn in [&first, &second] {
            // 1 = NORMAL
            let sync: i64 = conn
                .query_row("PRAGMA synchronous", [], |row| row.get(0))
                .unwrap();
            assert_eq!(sync, 1);
        }
    }

    #[test]
    fn test_schema_rejects_non_positive_amount() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let result = conn.execute(
            "INSERT INTO expenses (date, amount, category) VALUES ('2025-01-01', 0, 'Food')",
            [],
        );
        assert!(result.is_err(), "zero amount should violate the CHECK");
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        let path = path.to_str().unwrap();

        {
            let db = Database::new(path).unwrap();
            db.insert_expense(&NewExpense::parse("2025-01-01", "5", "Rent").unwrap())
                .unwrap();
        }

        let db = Database::new(path).unwrap();
        assert_eq!(db.count_expenses().unwrap(), 1);
    }
}
