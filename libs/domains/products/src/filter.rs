//! Product filter evaluation
//!
//! [`ProductFilter::matches`] is the reference semantics for listing. The
//! in-memory store applies it directly; the SQLite store translates the same
//! predicates into a query condition and must agree with it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::models::{Product, ProductFilter};

/// Quantities at or below this (and above zero) count as low stock
pub const LOW_STOCK_THRESHOLD: i32 = 5;

/// Stock bucket of a product
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StockLevel {
    /// quantity > LOW_STOCK_THRESHOLD
    InStock,
    /// 0 < quantity <= LOW_STOCK_THRESHOLD
    LowStock,
    /// quantity <= 0
    OutOfStock,
}

impl StockLevel {
    /// Classify a quantity into its bucket
    pub fn of(quantity: i32) -> Self {
        if quantity <= 0 {
            StockLevel::OutOfStock
        } else if quantity <= LOW_STOCK_THRESHOLD {
            StockLevel::LowStock
        } else {
            StockLevel::InStock
        }
    }
}

impl ProductFilter {
    /// Category predicate, if any. An empty string counts as unset.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Recognized stock bucket, or `None` when absent or unrecognized
    pub fn stock_level(&self) -> Option<StockLevel> {
        self.stock_filter.as_deref().and_then(|s| s.parse().ok())
    }

    /// Whether a product satisfies every predicate of this filter
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category() {
            if product.category != category {
                return false;
            }
        }

        if let Some(in_stock) = self.in_stock {
            if in_stock != (product.quantity > 0) {
                return false;
            }
        }

        if let Some(level) = self.stock_level() {
            if StockLevel::of(product.quantity) != level {
                return false;
            }
        }

        true
    }
}
