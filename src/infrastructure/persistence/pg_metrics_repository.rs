//! PostgreSQL implementation of the metrics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{StockedProduct, Transaction};
use crate::domain::repositories::MetricsRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ProductRow {
    product_id: String,
    name: String,
    category: String,
    current_stock: i32,
    max_stock: i32,
    low_stock_threshold: i32,
    unit: String,
}

impl From<ProductRow> for StockedProduct {
    fn from(row: ProductRow) -> Self {
        Self {
            product_id: row.product_id,
            name: row.name,
            category: row.category,
            current_stock: row.current_stock,
            max_stock: row.max_stock,
            low_stock_threshold: row.low_stock_threshold,
            unit: row.unit,
        }
    }
}

#[derive(FromRow)]
struct SaleRow {
    sale_id: String,
    sales_date: DateTime<Utc>,
    total_amount: f64,
    payment_method: String,
    status: String,
}

impl From<SaleRow> for Transaction {
    fn from(row: SaleRow) -> Self {
        Self {
            sale_id: row.sale_id,
            sales_date: row.sales_date,
            total_amount: row.total_amount,
            payment_method: row.payment_method,
            status: row.status,
        }
    }
}

/// PostgreSQL repository over the retail tables.
///
/// Monetary `NUMERIC` columns are cast to `float8` in SQL.
pub struct PgMetricsRepository {
    pool: Arc<PgPool>,
}

impl PgMetricsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for PgMetricsRepository {
    async fn completed_sales_total(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64, AppError> {
        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_amount), 0)::float8
            FROM sales
            WHERE sales_date >= $1
              AND sales_date < $2
              AND status = 'completed'
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(total)
    }

    async fn completed_items_sold(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let items: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(si.quantity), 0)::int8
            FROM sales_items si
            JOIN sales s ON s.id = si.sale_id
            WHERE s.sales_date >= $1
              AND s.sales_date < $2
              AND s.status = 'completed'
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(items)
    }

    async fn employee_counts(&self) -> Result<(i64, i64), AppError> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE status = 'active'), COUNT(*)
            FROM employees
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(counts)
    }

    async fn low_stock_products(&self) -> Result<Vec<StockedProduct>, AppError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT product_id, name, category, current_stock, max_stock,
                   low_stock_threshold, unit
            FROM products
            WHERE current_stock <= low_stock_threshold
            ORDER BY product_id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(StockedProduct::from).collect())
    }

    async fn recent_sales(&self, limit: i64) -> Result<Vec<Transaction>, AppError> {
        let rows: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT sale_id, sales_date, total_amount::float8 AS total_amount,
                   payment_method, status
            FROM sales
            ORDER BY sales_date DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn completed_sales_since(
        &self,
        start: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, f64)>, AppError> {
        let rows: Vec<(DateTime<Utc>, f64)> = sqlx::query_as(
            r#"
            SELECT sales_date, total_amount::float8
            FROM sales
            WHERE sales_date >= $1
              AND status = 'completed'
            ORDER BY sales_date
            "#,
        )
        .bind(start)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
