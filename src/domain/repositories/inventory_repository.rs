//! Repository trait for the product catalogue.

use async_trait::async_trait;

use crate::domain::entities::{CategoryCount, InventoryFilter, Product};
use crate::error::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Products matching the filter, ordered by `product_id`.
    ///
    /// `search` matches a case-insensitive substring of the name or the
    /// product id, within `category` when one is set.
    async fn list_products(&self, filter: &InventoryFilter) -> Result<Vec<Product>, AppError>;

    /// Product count per category, unordered.
    async fn category_counts(&self) -> Result<Vec<CategoryCount>, AppError>;
}
