use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductInput, price_to_cents};

/// Repository trait for Product persistence
///
/// Implementations must be observably identical: same filtering, same
/// insertion ordering, same soft-delete visibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product, assigning its id and timestamps
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    /// Get a live product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List live products matching the filter, in insertion order
    async fn list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>>;

    /// Replace the mutable fields of a live product
    ///
    /// Returns [`ProductError::NotFound`] when no live product has this id.
    async fn update(&self, id: Uuid, input: ProductInput) -> ProductResult<()>;

    /// Soft-delete a live product
    ///
    /// Returns [`ProductError::NotFound`] when no live product has this id.
    async fn delete(&self, id: Uuid) -> ProductResult<()>;

    /// Distinct categories of live products, sorted ascending
    async fn list_categories(&self) -> ProductResult<Vec<String>>;

    /// Check that the backing storage is reachable
    async fn health_check(&self) -> ProductResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct StoredProduct {
    product: Product,
    deleted_at: Option<DateTime<Utc>>,
}

impl StoredProduct {
    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Records live in a `Vec` so listing follows insertion order. Deleted
/// records are kept with a deletion marker and hidden from every read.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<StoredProduct>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        // Same representable range as the SQLite cents column
        price_to_cents(input.price)?;
        let mut products = self.products.write().await;

        let product = Product::new(input);
        products.push(StoredProduct {
            product: product.clone(),
            deleted_at: None,
        });

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|p| p.is_live() && p.product.id == id)
            .map(|p| p.product.clone()))
    }

    async fn list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.is_live() && filter.matches(&p.product))
            .map(|p| p.product.clone())
            .collect())
    }

    async fn update(&self, id: Uuid, input: ProductInput) -> ProductResult<()> {
        price_to_cents(input.price)?;
        let mut products = self.products.write().await;

        let stored = products
            .iter_mut()
            .find(|p| p.is_live() && p.product.id == id)
            .ok_or(ProductError::NotFound(id))?;
        stored.product.apply(input);

        tracing::info!(product_id = %id, "Updated product");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<()> {
        let mut products = self.products.write().await;

        let stored = products
            .iter_mut()
            .find(|p| p.is_live() && p.product.id == id)
            .ok_or(ProductError::NotFound(id))?;
        let now = Utc::now();
        stored.deleted_at = Some(now);
        stored.product.updated_at = now;

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn list_categories(&self) -> ProductResult<Vec<String>> {
        let products = self.products.read().await;

        let mut categories: Vec<String> = products
            .iter()
            .filter(|p| p.is_live())
            .map(|p| p.product.category.clone())
            .collect();
        categories.sort();
        categories.dedup();

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, category: &str, quantity: i32) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            price: 4.5,
        }
    }

    fn input_with_price(price: f64) -> ProductInput {
        ProductInput {
            price,
            ..input("Widget", "Tools", 1)
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(input("Widget", "Tools", 3)).await.unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.created_at, product.updated_at);

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
    }

    #[tokio::test]
    async fn test_deleted_product_is_hidden_but_retained() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(input("Widget", "Tools", 3)).await.unwrap();

        repo.delete(product.id).await.unwrap();

        assert_eq!(repo.get_by_id(product.id).await.unwrap(), None);
        assert!(repo.list(&ProductFilter::default()).await.unwrap().is_empty());
        assert!(repo.list_categories().await.unwrap().is_empty());
        assert_eq!(repo.products.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_deleted_product_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(input("Widget", "Tools", 3)).await.unwrap();
        repo.delete(product.id).await.unwrap();

        let result = repo.update(product.id, input("Gadget", "Toys", 1)).await;
        assert!(matches!(result, Err(ProductError::NotFound(id)) if id == product.id));
    }

    #[tokio::test]
    async fn test_categories_sorted_and_distinct() {
        let repo = InMemoryProductRepository::new();
        repo.create(input("Hammer", "Tools", 1)).await.unwrap();
        repo.create(input("Kite", "Toys", 1)).await.unwrap();
        repo.create(input("Saw", "Tools", 1)).await.unwrap();
        repo.create(input("Apple", "Food", 1)).await.unwrap();

        let categories = repo.list_categories().await.unwrap();
        assert_eq!(categories, vec!["Food", "Tools", "Toys"]);
    }

    #[tokio::test]
    async fn test_unstorable_price_is_rejected() {
        let repo = InMemoryProductRepository::new();

        let result = repo.create(input_with_price(1e17)).await;
        assert!(matches!(result, Err(ProductError::Storage(_))));
        assert!(repo.products.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryProductRepository::new();
        let other = repo.clone();

        let product = repo.create(input("Widget", "Tools", 3)).await.unwrap();
        assert!(other.get_by_id(product.id).await.unwrap().is_some());
    }
}
