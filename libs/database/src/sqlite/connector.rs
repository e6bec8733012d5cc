use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::SqliteConfig;

/// Open a SQLite connection pool from a [`SqliteConfig`]
///
/// # Example
/// ```ignore
/// use database::sqlite::{connect, SqliteConfig};
///
/// let db = connect(&SqliteConfig::new("sqlite::memory:")).await?;
/// ```
pub async fn connect(config: &SqliteConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.clone().into_connect_options()).await?;

    info!(
        url = config.url(),
        max_connections = config.max_connections,
        "Successfully connected to SQLite database"
    );

    Ok(db)
}

/// Run database migrations using the provided Migrator
///
/// # Example
/// ```ignore
/// use migration::Migrator;
/// use database::sqlite::run_migrations;
///
/// run_migrations::<Migrator>(&db, "products_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
