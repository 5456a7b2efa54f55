//! PostgreSQL implementation of the inventory repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{CategoryCount, InventoryFilter, Product};
use crate::domain::repositories::InventoryRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ProductRow {
    product_id: String,
    name: String,
    category: String,
    price: f64,
    current_stock: i32,
    max_stock: i32,
    low_stock_threshold: i32,
    unit: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            product_id: row.product_id,
            name: row.name,
            category: row.category,
            price: row.price,
            current_stock: row.current_stock,
            max_stock: row.max_stock,
            low_stock_threshold: row.low_stock_threshold,
            unit: row.unit,
        }
    }
}

/// Turns a search term into an `ILIKE` substring pattern, matching `%`, `_`
/// and `\` literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct PgInventoryRepository {
    pool: Arc<PgPool>,
}

impl PgInventoryRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    async fn list_products(&self, filter: &InventoryFilter) -> Result<Vec<Product>, AppError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT product_id, name, category, price::float8 AS price, current_stock,
                   max_stock, low_stock_threshold, unit
            FROM products
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL
                   OR name ILIKE $2 ESCAPE '\'
                   OR product_id ILIKE $2 ESCAPE '\')
            ORDER BY product_id
            "#,
        )
        .bind(filter.category.as_deref())
        .bind(filter.search.as_deref().map(like_pattern))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>, AppError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT category, COUNT(*)
            FROM products
            GROUP BY category
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(category, products)| CategoryCount { category, products })
            .collect())
    }
}
