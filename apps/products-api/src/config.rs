//! Configuration for Products API

use core_config::{
    AppInfo, FromEnv, app_info, database::DatabaseConfig, env_parse_or, server::ServerConfig,
};
use database::sqlite::SqliteConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: DatabaseConfig,
    pub sqlite: SqliteConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// How long in-flight requests get to finish once shutdown starts
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = DatabaseConfig::from_env()?;
        let sqlite = SqliteConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let shutdown_secs: u64 = env_parse_or("SHUTDOWN_TIMEOUT_SECS", 30)?;

        Ok(Self {
            app: app_info!(),
            database,
            sqlite,
            server,
            environment,
            shutdown_timeout: Duration::from_secs(shutdown_secs),
        })
    }
}
