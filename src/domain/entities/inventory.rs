//! Product catalogue entities for the inventory page.

use serde::Serialize;

use super::metrics::StockStatus;

/// Categories in the order the storefront lists them. Any other category
/// follows alphabetically.
pub const CATEGORY_ORDER: [&str; 5] = [
    "Beverages",
    "Bakery & Snacks",
    "Health & Medicine",
    "Stationery",
    "Personal Care & Hygiene",
];

/// A catalogue entry with its stock levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub current_stock: i32,
    pub max_stock: i32,
    pub low_stock_threshold: i32,
    pub unit: String,
}

impl Product {
    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock, self.max_stock, self.low_stock_threshold)
    }
}

/// Number of products in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub products: i64,
}

/// Sorts categories into storefront order.
pub fn order_categories(categories: &mut [CategoryCount]) {
    let rank = |name: &str| {
        CATEGORY_ORDER
            .iter()
            .position(|known| *known == name)
            .unwrap_or(CATEGORY_ORDER.len())
    };

    categories.sort_by(|a, b| {
        rank(&a.category)
            .cmp(&rank(&b.category))
            .then_with(|| a.category.cmp(&b.category))
    });
}

/// Narrowing applied to the product list. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl InventoryFilter {
    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            category: clean(category),
            search: clean(search),
        }
    }
}

/// Everything the inventory page shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryListing {
    pub categories: Vec<CategoryCount>,
    pub products: Vec<Product>,
    /// Size of the whole catalogue, regardless of the filter.
    pub total_products: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(category: &str) -> CategoryCount {
        CategoryCount {
            category: category.to_string(),
            products: 1,
        }
    }

    #[test]
    fn test_known_categories_first_then_alphabetical() {
        let mut categories = vec![
            count("Toys"),
            count("Stationery"),
            count("Garden"),
            count("Beverages"),
            count("Bakery & Snacks"),
        ];

        order_categories(&mut categories);

        let names: Vec<_> = categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(
            names,
            vec!["Beverages", "Bakery & Snacks", "Stationery", "Garden", "Toys"]
        );
    }

    #[test]
    fn test_filter_ignores_blank_values() {
        let filter = InventoryFilter::new(Some("  ".to_string()), Some(" cola ".to_string()));

        assert_eq!(filter.category, None);
        assert_eq!(filter.search.as_deref(), Some("cola"));
        assert_eq!(InventoryFilter::new(None, None), InventoryFilter::default());
    }

    #[test]
    fn test_product_status() {
        let product = Product {
            product_id: "P001".to_string(),
            name: "Green Tea".to_string(),
            category: "Beverages".to_string(),
            price: 3.5,
            current_stock: 0,
            max_stock: 50,
            low_stock_threshold: 10,
            unit: "bottle".to_string(),
        };

        assert_eq!(product.status(), StockStatus::OutOfStock);
    }
}
