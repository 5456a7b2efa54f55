//! Sales report entities: best sellers, period totals and monthly revenue.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::metrics::StockedProduct;

/// Share of revenue reported as profit until cost prices are tracked.
pub const PROFIT_MARGIN: f64 = 0.7;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Change from `previous` to `current` in percent, one decimal.
///
/// Anything sold without a previous figure counts as 100% growth.
pub fn growth_percentage(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    round1((current - previous) / previous * 100.0)
}

/// Midnight UTC of the given date.
fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// First day of the month `back` months before the month of `date`.
pub fn month_start(date: NaiveDate, back: u32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 - back as i32;
    NaiveDate::from_ymd_opt(months.div_euclid(12), months.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(date)
}

/// Reporting periods that end at the current moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Today,
    /// Since Monday.
    Week,
    Month,
}

impl ReportPeriod {
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        match self {
            ReportPeriod::Today => midnight(today),
            ReportPeriod::Week => midnight(
                today - Duration::days(i64::from(today.weekday().num_days_from_monday())),
            ),
            ReportPeriod::Month => midnight(month_start(today, 0)),
        }
    }
}

/// Units and revenue of one product over a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTurnover {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub units_sold: i64,
    pub turnover: f64,
}

/// Revenue of one category over a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTurnover {
    pub category: String,
    pub turnover: f64,
}

/// A product ranked by this month's turnover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestSeller {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub units_sold: i64,
    pub turnover: f64,
    /// Turnover change against last month.
    pub growth: f64,
}

/// A category ranked by this month's turnover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestCategory {
    pub category: String,
    pub turnover: f64,
    pub growth: f64,
}

/// Completed sales totals up to now.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub today: f64,
    pub week: f64,
    pub month: f64,
}

/// Revenue of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// First day of the month.
    pub month: NaiveDate,
    pub revenue: f64,
    /// Whole-unit estimate at [`PROFIT_MARGIN`].
    pub profit: f64,
}

impl MonthlyRevenue {
    pub fn new(month: NaiveDate, revenue: f64) -> Self {
        Self {
            month,
            revenue,
            profit: (revenue * PROFIT_MARGIN).trunc(),
        }
    }
}

/// Everything on the report page and `/api/report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub generated_at: DateTime<Utc>,
    pub best_sellers: Vec<BestSeller>,
    pub best_categories: Vec<BestCategory>,
    pub low_stock: Vec<StockedProduct>,
    pub totals: PeriodTotals,
    pub revenue_trend: Vec<MonthlyRevenue>,
}

impl SalesReport {
    /// A report with no figures, dated `generated_at`.
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            best_sellers: Vec::new(),
            best_categories: Vec::new(),
            low_stock: Vec::new(),
            totals: PeriodTotals::default(),
            revenue_trend: Vec::new(),
        }
    }

    /// `AB{month}{year}-01`, e.g. `AB0325-01` for March 2025.
    pub fn report_id(&self) -> String {
        format!("AB{}-01", self.generated_at.format("%m%y"))
    }

    /// `INV-{day of year}`.
    pub fn reference(&self) -> String {
        format!("INV-{}", self.generated_at.format("%j"))
    }

    /// e.g. `10 March, 2025`.
    pub fn report_date(&self) -> String {
        self.generated_at.format("%d %B, %Y").to_string()
    }
}
