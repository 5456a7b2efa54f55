//! Aggregates the figures shown on the dashboard.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::domain::entities::{Comparison, DashboardMetrics, EmployeeStats, daily_totals};
use crate::domain::repositories::MetricsRepository;
use crate::error::AppError;

/// Low-stock products shown on the dashboard.
pub const LOW_STOCK_LIMIT: usize = 3;
/// Rows in the recent transactions table.
pub const RECENT_TRANSACTIONS_LIMIT: i64 = 6;
/// Days covered by the sales trend.
pub const SALES_TREND_DAYS: i64 = 7;

/// Service computing [`DashboardMetrics`] from raw repository queries.
///
/// Calendar days are UTC days.
pub struct DashboardService {
    repository: Arc<dyn MetricsRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn MetricsRepository>) -> Self {
        Self { repository }
    }

    /// Computes the dashboard metrics for the current moment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if any underlying query fails.
    pub async fn metrics(&self) -> Result<DashboardMetrics, AppError> {
        self.metrics_at(Utc::now()).await
    }

    /// Computes the dashboard metrics as seen at `now`.
    pub async fn metrics_at(&self, now: DateTime<Utc>) -> Result<DashboardMetrics, AppError> {
        let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let yesterday = today - Duration::days(1);
        let tomorrow = today + Duration::days(1);
        let trend_start = today - Duration::days(SALES_TREND_DAYS);

        let repo = self.repository.as_ref();

        let (
            sales_today,
            sales_yesterday,
            items_today,
            items_yesterday,
            (active, total),
            mut low_stock,
            recent_transactions,
            trend_sales,
        ) = tokio::try_join!(
            repo.completed_sales_total(today, tomorrow),
            repo.completed_sales_total(yesterday, today),
            repo.completed_items_sold(today, tomorrow),
            repo.completed_items_sold(yesterday, today),
            repo.employee_counts(),
            repo.low_stock_products(),
            repo.recent_sales(RECENT_TRANSACTIONS_LIMIT),
            repo.completed_sales_since(trend_start),
        )?;

        low_stock.sort_by(|a, b| a.threshold_ratio().total_cmp(&b.threshold_ratio()));
        low_stock.truncate(LOW_STOCK_LIMIT);

        Ok(DashboardMetrics {
            sales: Comparison::between(sales_today, sales_yesterday),
            items: Comparison::between(saturate(items_today), saturate(items_yesterday)),
            employees: EmployeeStats::new(active, total),
            low_stock,
            recent_transactions,
            sales_trend: daily_totals(&trend_sales),
        })
    }

    /// Checks database connectivity.
    pub async fn database_healthy(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
