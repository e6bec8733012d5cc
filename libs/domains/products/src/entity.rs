use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::error::ProductError;
use crate::models::{Product, ProductInput, cents_to_price, price_to_cents};

/// Sea-ORM Entity for the products table
///
/// The id is stored as hyphenated text and the price as integer cents.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price_cents: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Product {
    type Error = ProductError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id).map_err(|e| {
            ProductError::Storage(format!("Corrupt product id '{}': {}", model.id, e))
        })?;

        Ok(Self {
            id,
            name: model.name,
            category: model.category,
            quantity: model.quantity,
            price: cents_to_price(model.price_cents),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<&Product> for ActiveModel {
    type Error = ProductError;

    fn try_from(product: &Product) -> Result<Self, Self::Error> {
        Ok(ActiveModel {
            id: Set(product.id.to_string()),
            name: Set(product.name.clone()),
            category: Set(product.category.clone()),
            quantity: Set(product.quantity),
            price_cents: Set(price_to_cents(product.price)?),
            created_at: Set(product.created_at),
            updated_at: Set(product.updated_at),
            deleted_at: Set(None),
        })
    }
}

/// Column assignments for a whole-record replacement
pub(crate) fn replacement(
    input: ProductInput,
    now: DateTimeUtc,
) -> Result<ActiveModel, ProductError> {
    Ok(ActiveModel {
        price_cents: Set(price_to_cents(input.price)?),
        name: Set(input.name),
        category: Set(input.category),
        quantity: Set(input.quantity),
        updated_at: Set(now),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_round_trips_product() {
        let product = Product::new(ProductInput {
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            quantity: 3,
            price: 19.99,
        });

        let active = ActiveModel::try_from(&product).unwrap();
        assert_eq!(active.price_cents, Set(1999));

        let model = Model {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            quantity: product.quantity,
            price_cents: 1999,
            created_at: product.created_at,
            updated_at: product.updated_at,
            deleted_at: None,
        };
        assert_eq!(Product::try_from(model).unwrap(), product);
    }

    #[test]
    fn test_unstorable_price_is_storage_error() {
        let mut product = Product::new(ProductInput {
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            quantity: 1,
            price: 1.0,
        });
        product.price = 1e17;

        assert!(matches!(
            ActiveModel::try_from(&product),
            Err(ProductError::Storage(_))
        ));

        let input = ProductInput {
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            quantity: 1,
            price: 1e300,
        };
        assert!(matches!(
            replacement(input, Utc::now()),
            Err(ProductError::Storage(_))
        ));
    }

    #[test]
    fn test_corrupt_id_is_storage_error() {
        let now = Utc::now();
        let model = Model {
            id: "not-a-uuid".to_string(),
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            quantity: 1,
            price_cents: 100,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        assert!(matches!(
            Product::try_from(model),
            Err(ProductError::Storage(_))
        ));
    }
}
