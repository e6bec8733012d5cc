/// Unified database error type for connector and health operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// SeaORM / sqlx errors
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sea_orm::DbErr),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
