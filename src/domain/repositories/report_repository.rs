//! Repository trait for the sales report.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::{CategoryTurnover, ProductTurnover};
use crate::error::AppError;

/// Aggregates over completed sales and their line items.
///
/// Ranges are half-open: `start <= sales_date < end`. Turnover is
/// `quantity * unit_price` summed over line items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Units and turnover per product, unordered.
    async fn product_turnover(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ProductTurnover>, AppError>;

    /// Turnover per product category, unordered.
    async fn category_turnover(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CategoryTurnover>, AppError>;

    /// `(first day of month, total_amount)` for every UTC month since
    /// `start` that has completed sales.
    async fn monthly_revenue(
        &self,
        start: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, f64)>, AppError>;
}
