//! Database library providing the SQLite connector used by the product store
//!
//! # Features
//!
//! - `config` - `core_config::FromEnv` support for [`sqlite::SqliteConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::sqlite::{self, SqliteConfig};
//! use migration::Migrator;
//!
//! let db = sqlite::connect(&SqliteConfig::new("sqlite://products.db?mode=rwc")).await?;
//! sqlite::run_migrations::<Migrator>(&db, "products_api").await?;
//! ```

pub mod common;
pub mod sqlite;

pub use common::{DatabaseError, DatabaseResult};
