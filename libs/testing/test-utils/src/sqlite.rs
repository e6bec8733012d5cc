//! SQLite test infrastructure
//!
//! Provides a `TestDatabase` backed by a private in-memory SQLite database
//! with every workspace migration applied.

use database::sqlite::{MigratorTrait, SqliteConfig, connect};
use migration::Migrator;
use sea_orm::DatabaseConnection;

/// Test database wrapper
///
/// Each instance owns its own in-memory database; nothing is shared between
/// tests and nothing touches the filesystem. The database disappears when the
/// last clone of the connection is dropped.
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Create a new test database with migrations applied
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.connection() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        let mut config = SqliteConfig::new("sqlite::memory:");
        config.sqlx_logging = false;

        let connection = connect(&config)
            .await
            .expect("Failed to open in-memory SQLite database");

        Migrator::up(&connection, None)
            .await
            .expect("Failed to run migrations on test database");

        tracing::debug!("Test database ready (in-memory SQLite)");

        Self { connection }
    }

    /// Get a clone of the database connection
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    #[tokio::test]
    async fn test_products_table_exists_after_migrations() {
        let db = TestDatabase::new().await;

        let row = db
            .connection()
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM products",
            ))
            .await
            .unwrap()
            .unwrap();

        let n: i64 = row.try_get("", "n").unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let first = TestDatabase::new().await;
        let second = TestDatabase::new().await;

        first
            .connection()
            .execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "INSERT INTO products (id, name, category, quantity, price_cents, created_at, updated_at) \
                 VALUES ('x', 'Widget', 'Tools', 1, 100, '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')",
            ))
            .await
            .unwrap();

        let row = second
            .connection()
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM products",
            ))
            .await
            .unwrap()
            .unwrap();

        let n: i64 = row.try_get("", "n").unwrap();
        assert_eq!(n, 0);
    }
}
