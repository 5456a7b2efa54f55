//! Builds the sales report.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::domain::entities::{
    BestCategory, BestSeller, CategoryTurnover, MonthlyRevenue, PeriodTotals, ProductTurnover,
    ReportPeriod, SalesReport, growth_percentage, month_start,
};
use crate::domain::repositories::{MetricsRepository, ReportRepository};
use crate::error::AppError;

pub const BEST_SELLERS_LIMIT: usize = 10;
pub const BEST_CATEGORIES_LIMIT: usize = 3;
pub const LOW_STOCK_LIMIT: usize = 3;
/// Months in the revenue chart, current month included.
pub const REVENUE_TREND_MONTHS: u32 = 7;

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn best_sellers(current: Vec<ProductTurnover>, previous: &[ProductTurnover]) -> Vec<BestSeller> {
    let before: HashMap<&str, f64> = previous
        .iter()
        .map(|p| (p.product_id.as_str(), p.turnover))
        .collect();

    let mut ranked: Vec<BestSeller> = current
        .into_iter()
        .map(|p| {
            let growth =
                growth_percentage(p.turnover, before.get(p.product_id.as_str()).copied().unwrap_or(0.0));
            BestSeller {
                product_id: p.product_id,
                name: p.name,
                category: p.category,
                units_sold: p.units_sold,
                turnover: p.turnover,
                growth,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.turnover.total_cmp(&a.turnover));
    ranked.truncate(BEST_SELLERS_LIMIT);
    ranked
}

fn best_categories(
    current: Vec<CategoryTurnover>,
    previous: &[CategoryTurnover],
) -> Vec<BestCategory> {
    let before: HashMap<&str, f64> = previous
        .iter()
        .map(|c| (c.category.as_str(), c.turnover))
        .collect();

    let mut ranked: Vec<BestCategory> = current
        .into_iter()
        .map(|c| BestCategory {
            growth: growth_percentage(
                c.turnover,
                before.get(c.category.as_str()).copied().unwrap_or(0.0),
            ),
            category: c.category,
            turnover: c.turnover,
        })
        .collect();

    ranked.sort_by(|a, b| b.turnover.total_cmp(&a.turnover));
    ranked.truncate(BEST_CATEGORIES_LIMIT);
    ranked
}

/// One entry per month, oldest first; months without sales are zero.
fn revenue_trend(today: NaiveDate, monthly: &[(NaiveDate, f64)]) -> Vec<MonthlyRevenue> {
    let by_month: HashMap<NaiveDate, f64> = monthly.iter().copied().collect();

    (0..REVENUE_TREND_MONTHS)
        .rev()
        .map(|back| {
            let month = month_start(today, back);
            MonthlyRevenue::new(month, by_month.get(&month).copied().unwrap_or(0.0))
        })
        .collect()
}

/// Combines turnover rankings, period totals, low stock and monthly
/// revenue. Months and days are UTC.
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    metrics: Arc<dyn MetricsRepository>,
}

impl ReportService {
    pub fn new(reports: Arc<dyn ReportRepository>, metrics: Arc<dyn MetricsRepository>) -> Self {
        Self { reports, metrics }
    }

    pub async fn report(&self) -> Result<SalesReport, AppError> {
        self.report_at(Utc::now()).await
    }

    /// Builds the report as seen at `now`.
    ///
    /// Rankings compare the current calendar month with the previous one.
    pub async fn report_at(&self, now: DateTime<Utc>) -> Result<SalesReport, AppError> {
        let today = now.date_naive();
        let this_month_day = month_start(today, 0);
        let this_month = midnight(this_month_day);
        let next_month = midnight(month_start(this_month_day + Duration::days(31), 0));
        let last_month = midnight(month_start(today, 1));
        let trend_start = midnight(month_start(today, REVENUE_TREND_MONTHS - 1));

        let reports = self.reports.as_ref();
        let metrics = self.metrics.as_ref();

        let (
            products_now,
            products_before,
            categories_now,
            categories_before,
            monthly,
            mut low_stock,
            total_today,
            total_week,
            total_month,
        ) = tokio::try_join!(
            reports.product_turnover(this_month, next_month),
            reports.product_turnover(last_month, this_month),
            reports.category_turnover(this_month, next_month),
            reports.category_turnover(last_month, this_month),
            reports.monthly_revenue(trend_start),
            metrics.low_stock_products(),
            metrics.completed_sales_total(ReportPeriod::Today.start(now), now),
            metrics.completed_sales_total(ReportPeriod::Week.start(now), now),
            metrics.completed_sales_total(ReportPeriod::Month.start(now), now),
        )?;

        low_stock.sort_by_key(|p| p.current_stock);
        low_stock.truncate(LOW_STOCK_LIMIT);

        Ok(SalesReport {
            generated_at: now,
            best_sellers: best_sellers(products_now, &products_before),
            best_categories: best_categories(categories_now, &categories_before),
            low_stock,
            totals: PeriodTotals {
                today: total_today,
                week: total_week,
                month: total_month,
            },
            revenue_trend: revenue_trend(today, &monthly),
        })
    }
}
