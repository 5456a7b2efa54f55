//! Product catalogue listing for the inventory page.

use std::sync::Arc;

use crate::domain::entities::{InventoryFilter, InventoryListing, order_categories};
use crate::domain::repositories::InventoryRepository;
use crate::error::AppError;

pub struct InventoryService {
    repository: Arc<dyn InventoryRepository>,
}

impl InventoryService {
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self { repository }
    }

    /// Lists the products matching `filter` next to the category tabs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if a query fails.
    pub async fn listing(&self, filter: &InventoryFilter) -> Result<InventoryListing, AppError> {
        let (products, mut categories) = tokio::try_join!(
            self.repository.list_products(filter),
            self.repository.category_counts(),
        )?;

        order_categories(&mut categories);
        let total_products = categories.iter().map(|c| c.products).sum();

        Ok(InventoryListing {
            categories,
            products,
            total_products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CategoryCount, Product};
    use crate::domain::repositories::MockInventoryRepository;
    use serde_json::json;

    fn product(id: &str, category: &str) -> Product {
        Product {
            product_id: id.to_string(),
            name: format!("Product {id}"),
            category: category.to_string(),
            price: 2.0,
            current_stock: 20,
            max_stock: 50,
            low_stock_threshold: 10,
            unit: "unit".to_string(),
        }
    }

    fn counts() -> Vec<CategoryCount> {
        vec![
            CategoryCount {
                category: "Stationery".to_string(),
                products: 4,
            },
            CategoryCount {
                category: "Beverages".to_string(),
                products: 3,
            },
        ]
    }

    #[tokio::test]
    async fn test_listing_passes_filter_and_totals_catalogue() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_list_products()
            .withf(|filter| filter.category.as_deref() == Some("Beverages"))
            .times(1)
            .returning(|_| Ok(vec![product("P001", "Beverages")]));
        repo.expect_category_counts().returning(|| Ok(counts()));

        let service = InventoryService::new(Arc::new(repo));
        let filter = InventoryFilter::new(Some("Beverages".to_string()), None);

        let listing = service.listing(&filter).await.unwrap();

        assert_eq!(listing.products.len(), 1);
        assert_eq!(listing.total_products, 7);
        assert_eq!(listing.categories[0].category, "Beverages");
    }

    #[tokio::test]
    async fn test_listing_propagates_errors() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_list_products().returning(|_| Ok(vec![]));
        repo.expect_category_counts()
            .returning(|| Err(AppError::internal("Database error", json!({}))));

        let service = InventoryService::new(Arc::new(repo));

        let result = service.listing(&InventoryFilter::default()).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
