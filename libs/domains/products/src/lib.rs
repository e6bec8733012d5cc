//! Products Domain
//!
//! Product inventory records with filtering by category and stock level,
//! backed either by an in-process store or by SQLite through SeaORM.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation gate
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + in-memory and SQLite implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, filter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{InMemoryProductRepository, ProductService, handlers};
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sqlite;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use filter::{LOW_STOCK_THRESHOLD, StockLevel};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, MAX_PRICE, Product, ProductFilter, ProductInput, UpdateProduct,
};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use sqlite::SqliteProductRepository;
