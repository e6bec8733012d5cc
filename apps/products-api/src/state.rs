//! Application state management

use domain_products::{ProductRepository, ProductService};

use crate::config::Config;

/// Shared application state, generic over the configured product store
pub struct AppState<R: ProductRepository> {
    pub config: Config,
    pub products: ProductService<R>,
}

impl<R: ProductRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            products: self.products.clone(),
        }
    }
}
