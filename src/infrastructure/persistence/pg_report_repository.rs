//! PostgreSQL implementation of the report repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{CategoryTurnover, ProductTurnover};
use crate::domain::repositories::ReportRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct TurnoverRow {
    product_id: String,
    name: String,
    category: String,
    units_sold: i64,
    turnover: f64,
}

impl From<TurnoverRow> for ProductTurnover {
    fn from(row: TurnoverRow) -> Self {
        Self {
            product_id: row.product_id,
            name: row.name,
            category: row.category,
            units_sold: row.units_sold,
            turnover: row.turnover,
        }
    }
}

/// Line items of deleted products are left out of the rankings.
pub struct PgReportRepository {
    pool: Arc<PgPool>,
}

impl PgReportRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn product_turnover(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ProductTurnover>, AppError> {
        let rows: Vec<TurnoverRow> = sqlx::query_as(
            r#"
            SELECT p.product_id, p.name, p.category,
                   SUM(si.quantity)::int8 AS units_sold,
                   SUM(si.quantity * si.unit_price)::float8 AS turnover
            FROM sales_items si
            JOIN sales s ON s.id = si.sale_id
            JOIN products p ON p.id = si.product_id
            WHERE s.sales_date >= $1
              AND s.sales_date < $2
              AND s.status = 'completed'
            GROUP BY p.product_id, p.name, p.category
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ProductTurnover::from).collect())
    }

    async fn category_turnover(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CategoryTurnover>, AppError> {
        let rows: Vec<(String, f64)> = sqlx::query_as(
            r#"
            SELECT p.category, SUM(si.quantity * si.unit_price)::float8
            FROM sales_items si
            JOIN sales s ON s.id = si.sale_id
            JOIN products p ON p.id = si.product_id
            WHERE s.sales_date >= $1
              AND s.sales_date < $2
              AND s.status = 'completed'
            GROUP BY p.category
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(category, turnover)| CategoryTurnover { category, turnover })
            .collect())
    }

    async fn monthly_revenue(
        &self,
        start: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, f64)>, AppError> {
        let rows: Vec<(NaiveDate, f64)> = sqlx::query_as(
            r#"
            SELECT date_trunc('month', sales_date AT TIME ZONE 'UTC')::date AS month,
                   SUM(total_amount)::float8
            FROM sales
            WHERE sales_date >= $1
              AND status = 'completed'
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(start)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }
}
