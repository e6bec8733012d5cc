use crate::{env_or_default, ConfigError, FromEnv};
use std::str::FromStr;

/// Which product store backs the API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// SQLite file via SeaORM
    #[default]
    Sqlite,
    /// Process-local collection, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Database configuration
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub path: String,
    pub backend: StoreBackend,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            backend: StoreBackend::Sqlite,
        }
    }

    /// SQLite connection URL for the configured path.
    ///
    /// The file is created on first connect.
    pub fn url(&self) -> String {
        if self.path == ":memory:" {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}?mode=rwc", self.path)
        }
    }
}

impl FromEnv for DatabaseConfig {
    /// - DB_PATH: defaults to `products.db`
    /// - STORE_BACKEND: `sqlite` (default) or `memory`
    fn from_env() -> Result<Self, ConfigError> {
        let path = env_or_default("DB_PATH", "products.db");
        let backend = env_or_default("STORE_BACKEND", "sqlite")
            .parse()
            .map_err(|details| ConfigError::ParseError {
                key: "STORE_BACKEND".to_string(),
                details,
            })?;

        Ok(Self { path, backend })
    }
}
