use sea_orm::ConnectOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{database::DatabaseConfig, env_parse_or, ConfigError, FromEnv};

/// SQLite connection pool configuration
///
/// An in-memory database lives only as long as its connections, so
/// [`SqliteConfig::new`] pins the pool to a single connection for
/// `sqlite::memory:` URLs.
#[derive(Clone, Debug)]
pub struct SqliteConfig {
    /// Connection URL, e.g. `sqlite://products.db?mode=rwc`
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Enable SQL statement logging
    pub sqlx_logging: bool,
}

impl SqliteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let max_connections = if is_memory_url(&url) { 1 } else { 5 };

        Self {
            url,
            max_connections,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            sqlx_logging: true,
        }
    }

    pub fn is_memory(&self) -> bool {
        is_memory_url(&self.url)
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging);
        if self.is_memory() {
            // Recycling the only connection would drop the whole database
            opt.max_lifetime(Duration::from_secs(u32::MAX as u64));
        }
        opt
    }

    /// Get a reference to the database URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Load SqliteConfig from environment variables
///
/// - `DB_PATH` (optional, default: `products.db`)
/// - `DB_MAX_CONNECTIONS` (optional, default: 5, forced to 1 in memory)
/// - `DB_SQLX_LOGGING` (optional, default: true)
#[cfg(feature = "config")]
impl FromEnv for SqliteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = SqliteConfig::from(&DatabaseConfig::from_env()?);

        if !config.is_memory() {
            config.max_connections = env_parse_or("DB_MAX_CONNECTIONS", config.max_connections)?;
        }
        config.sqlx_logging = env_parse_or("DB_SQLX_LOGGING", config.sqlx_logging)?;

        Ok(config)
    }
}

#[cfg(feature = "config")]
impl From<&DatabaseConfig> for SqliteConfig {
    fn from(config: &DatabaseConfig) -> Self {
        SqliteConfig::new(config.url())
    }
}
