use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ProductError, ProductResult};

/// Largest accepted unit price, the range of a `DECIMAL(10,2)` column
pub const MAX_PRICE: f64 = 99_999_999.99;

/// Product entity as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned once at creation
    pub id: Uuid,
    /// Product name (at least 2 characters)
    pub name: String,
    /// Category label, exact-match filter key
    pub category: String,
    /// Units in stock; zero means out of stock
    pub quantity: i32,
    /// Unit price, at most two decimal places
    pub price: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a fresh product with a random id and both timestamps set to now
    pub fn new(input: ProductInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            quantity: input.quantity,
            price: input.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all mutable fields and refresh `updated_at`
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.category = input.category;
        self.quantity = input.quantity;
        self.price = input.price;
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a product
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error alongside the others instead of failing
/// deserialization on the first one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(required, length(min = 2))]
    #[schema(example = "Widget", min_length = 2)]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    #[schema(example = "Tools", min_length = 1)]
    pub category: Option<String>,

    #[validate(required, range(min = 0))]
    #[schema(example = 3, minimum = 0)]
    pub quantity: Option<i32>,

    #[validate(
        required,
        range(min = 0.0, max = 99_999_999.99),
        custom(function = "validate_price")
    )]
    #[schema(example = 9.99, minimum = 0, maximum = 99_999_999.99)]
    pub price: Option<f64>,
}

/// DTO for replacing a product; same shape and rules as [`CreateProduct`]
pub type UpdateProduct = CreateProduct;

/// A validated product payload, ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price: f64,
}

impl TryFrom<CreateProduct> for ProductInput {
    type Error = ValidationErrors;

    fn try_from(request: CreateProduct) -> Result<Self, Self::Error> {
        request.validate()?;

        // `required` on every field has already rejected any `None`
        let CreateProduct {
            name: Some(name),
            category: Some(category),
            quantity: Some(quantity),
            price: Some(price),
        } = request
        else {
            return Err(ValidationErrors::new());
        };

        Ok(Self {
            name,
            category,
            quantity,
            price,
        })
    }
}

/// Query-time filter for listing products
///
/// All present predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact, case-sensitive category match; empty means no filter
    pub category: Option<String>,
    /// `true` keeps quantity > 0, `false` keeps quantity <= 0
    pub in_stock: Option<bool>,
    /// One of `in_stock`, `low_stock`, `out_of_stock`; anything else is ignored
    pub stock_filter: Option<String>,
}

/// Reject prices with more than two fractional digits
fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::new("price_not_finite"));
    }

    let scaled = price * 100.0;
    if (scaled - scaled.round()).abs() > 1e-6 {
        let mut err = ValidationError::new("price_precision");
        err.message = Some("price must have at most two decimal places".into());
        return Err(err);
    }

    Ok(())
}

/// Convert a price to integer cents
///
/// Fails with [`ProductError::Storage`] when the price has no `i64` cents
/// representation; the cast would otherwise saturate.
pub fn price_to_cents(price: f64) -> ProductResult<i64> {
    let cents = (price * 100.0).round();
    if cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64 {
        Ok(cents as i64)
    } else {
        Err(ProductError::Storage(format!(
            "Price {} cannot be stored as integer cents",
            price
        )))
    }
}

/// Convert integer cents back to a decimal price
pub fn cents_to_price(cents: i64) -> f64 {
    cents as f64 / 100.0
}
