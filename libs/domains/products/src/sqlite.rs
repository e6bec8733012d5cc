use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity::{self, Column, Entity},
    error::{ProductError, ProductResult},
    filter::{LOW_STOCK_THRESHOLD, StockLevel},
    models::{Product, ProductFilter, ProductInput},
    repository::ProductRepository,
};

/// SQLite-backed product store via SeaORM
///
/// Listing order follows SQLite's `rowid`, which increases with each insert.
#[derive(Clone)]
pub struct SqliteProductRepository {
    db: DatabaseConnection,
}

impl SqliteProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Translate a filter into a storage-side condition over live rows
pub fn filter_condition(filter: &ProductFilter) -> Condition {
    let mut condition = Condition::all().add(Column::DeletedAt.is_null());

    if let Some(category) = filter.category() {
        condition = condition.add(Column::Category.eq(category));
    }

    match filter.in_stock {
        Some(true) => condition = condition.add(Column::Quantity.gt(0)),
        Some(false) => condition = condition.add(Column::Quantity.lte(0)),
        None => {}
    }

    match filter.stock_level() {
        Some(StockLevel::InStock) => {
            condition = condition.add(Column::Quantity.gt(LOW_STOCK_THRESHOLD));
        }
        Some(StockLevel::LowStock) => {
            condition = condition
                .add(Column::Quantity.gt(0))
                .add(Column::Quantity.lte(LOW_STOCK_THRESHOLD));
        }
        Some(StockLevel::OutOfStock) => {
            condition = condition.add(Column::Quantity.lte(0));
        }
        None => {}
    }

    condition
}

fn live(id: Uuid) -> Condition {
    Condition::all()
        .add(Column::Id.eq(id.to_string()))
        .add(Column::DeletedAt.is_null())
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let product = Product::new(input);
        let active_model = entity::ActiveModel::try_from(&product)?;

        Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Entity::find()
            .filter(live(id))
            .one(&self.db)
            .await?
            .map(Product::try_from)
            .transpose()
    }

    async fn list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let models = Entity::find()
            .filter(filter_condition(filter))
            .order_by(Expr::cust("rowid"), Order::Asc)
            .all(&self.db)
            .await?;

        models.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, id: Uuid, input: ProductInput) -> ProductResult<()> {
        let result = Entity::update_many()
            .set(entity::replacement(input, Utc::now())?)
            .filter(live(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Updated product");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<()> {
        let now = Utc::now();
        let result = Entity::update_many()
            .set(entity::ActiveModel {
                deleted_at: Set(Some(now)),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(live(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn list_categories(&self) -> ProductResult<Vec<String>> {
        let categories = Entity::find()
            .select_only()
            .column(Column::Category)
            .distinct()
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::Category)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(categories)
    }

    async fn health_check(&self) -> ProductResult<()> {
        database::sqlite::check_health(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, QueryTrait};

    /// The WHERE clause of the listing query, values inlined
    fn where_clause(filter: &ProductFilter) -> String {
        let sql = Entity::find()
            .filter(filter_condition(filter))
            .build(DatabaseBackend::Sqlite)
            .to_string();
        sql.split_once("WHERE")
            .map(|(_, clause)| clause.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_default_filter_only_excludes_deleted() {
        let clause = where_clause(&ProductFilter::default());
        assert!(clause.contains(r#""deleted_at" IS NULL"#));
        assert!(!clause.contains(r#""quantity""#));
        assert!(!clause.contains(r#""category""#));
    }

    #[test]
    fn test_empty_category_adds_no_predicate() {
        let query = where_clause(&ProductFilter {
            category: Some(String::new()),
            ..Default::default()
        });
        assert!(!query.contains(r#""category" ="#));
    }

    #[test]
    fn test_low_stock_translates_to_range() {
        let query = where_clause(&ProductFilter {
            stock_filter: Some("low_stock".to_string()),
            ..Default::default()
        });
        assert!(query.contains(r#""quantity" > 0"#));
        assert!(query.contains(r#""quantity" <= 5"#));
    }

    #[test]
    fn test_unknown_stock_filter_adds_no_predicate() {
        let query = where_clause(&ProductFilter {
            stock_filter: Some("plenty".to_string()),
            ..Default::default()
        });
        assert!(!query.contains(r#""quantity""#));
    }

    #[test]
    fn test_in_stock_and_stock_filter_combine() {
        let query = where_clause(&ProductFilter {
            category: Some("Tools".to_string()),
            in_stock: Some(false),
            stock_filter: Some("in_stock".to_string()),
        });
        assert!(query.contains(r#""category" = 'Tools'"#));
        assert!(query.contains(r#""quantity" <= 0"#));
        assert!(query.contains(r#""quantity" > 5"#));
    }
}
