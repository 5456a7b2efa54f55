//! Repository trait for dashboard figures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{StockedProduct, Transaction};
use crate::error::AppError;

/// Read-only queries over `sales`, `sales_items`, `employees` and `products`.
///
/// Time ranges are half-open: `start <= sales_date < end`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMetricsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Sum of `total_amount` over completed sales in the range.
    async fn completed_sales_total(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64, AppError>;

    /// Sum of line item quantities over completed sales in the range.
    async fn completed_items_sold(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, AppError>;

    /// Returns `(active, total)` employee counts.
    async fn employee_counts(&self) -> Result<(i64, i64), AppError>;

    /// Products with `current_stock <= low_stock_threshold`, unordered.
    async fn low_stock_products(&self) -> Result<Vec<StockedProduct>, AppError>;

    /// Most recent sales of any status, newest first.
    async fn recent_sales(&self, limit: i64) -> Result<Vec<Transaction>, AppError>;

    /// `(sales_date, total_amount)` of completed sales since `start`.
    async fn completed_sales_since(
        &self,
        start: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, f64)>, AppError>;

    /// Round-trips a trivial query.
    async fn ping(&self) -> Result<(), AppError>;
}
