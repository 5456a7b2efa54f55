//! Dashboard metric entities and the arithmetic behind them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Day-over-day comparison of a metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison<T> {
    pub today: T,
    pub yesterday: T,
    /// Change relative to yesterday in percent, one decimal.
    pub percentage: f64,
    pub is_positive: bool,
}

impl<T: Copy + Into<f64>> Comparison<T> {
    /// Builds a comparison. With no baseline (yesterday is zero) the change
    /// is reported as 0% and positive.
    pub fn between(today: T, yesterday: T) -> Self {
        let (t, y): (f64, f64) = (today.into(), yesterday.into());

        if y > 0.0 {
            let change = (t - y) / y * 100.0;
            Self {
                today,
                yesterday,
                percentage: round1(change),
                is_positive: change >= 0.0,
            }
        } else {
            Self {
                today,
                yesterday,
                percentage: 0.0,
                is_positive: true,
            }
        }
    }
}

impl<T: Default> Default for Comparison<T> {
    fn default() -> Self {
        Self {
            today: T::default(),
            yesterday: T::default(),
            percentage: 0.0,
            is_positive: true,
        }
    }
}

/// Active versus total headcount.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeStats {
    pub active: i64,
    pub total: i64,
    pub percentage: f64,
}

impl EmployeeStats {
    pub fn new(active: i64, total: i64) -> Self {
        let percentage = if total > 0 {
            round1(active as f64 / total as f64 * 100.0)
        } else {
            0.0
        };

        Self {
            active,
            total,
            percentage,
        }
    }
}

/// Stock level classification of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    HighStock,
    Completed,
}

impl StockStatus {
    /// Classifies a stock level. Checks run in order: empty, at or below the
    /// low threshold, at or above the maximum, otherwise normal.
    pub fn classify(current_stock: i32, max_stock: i32, low_stock_threshold: i32) -> Self {
        if current_stock == 0 {
            StockStatus::OutOfStock
        } else if current_stock <= low_stock_threshold {
            StockStatus::LowStock
        } else if current_stock >= max_stock {
            StockStatus::HighStock
        } else {
            StockStatus::Completed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::HighStock => "High Stock",
            StockStatus::Completed => "In Stock",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::HighStock => "high_stock",
            StockStatus::Completed => "completed",
        }
    }
}

/// Product whose stock is at or below its low-stock threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockedProduct {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub current_stock: i32,
    pub max_stock: i32,
    pub low_stock_threshold: i32,
    pub unit: String,
}

impl StockedProduct {
    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock, self.max_stock, self.low_stock_threshold)
    }

    /// Fill level relative to the threshold, used to rank low-stock items.
    /// A zero threshold ranks first.
    pub fn threshold_ratio(&self) -> f64 {
        if self.low_stock_threshold > 0 {
            self.current_stock as f64 / self.low_stock_threshold as f64
        } else {
            0.0
        }
    }

    /// Stock formatted as `current/max`.
    pub fn stock_display(&self) -> String {
        format!("{}/{}", self.current_stock, self.max_stock)
    }
}

/// A sale as listed in the recent transactions table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub sale_id: String,
    pub sales_date: DateTime<Utc>,
    pub total_amount: f64,
    pub payment_method: String,
    pub status: String,
}

/// Completed sales total for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Groups `(timestamp, amount)` pairs by UTC calendar date, ascending.
pub fn daily_totals(sales: &[(DateTime<Utc>, f64)]) -> Vec<TrendPoint> {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (at, amount) in sales {
        *per_day.entry(at.date_naive()).or_insert(0.0) += amount;
    }

    per_day
        .into_iter()
        .map(|(date, amount)| TrendPoint { date, amount })
        .collect()
}

/// Everything the dashboard page and `/api/metrics` show.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub sales: Comparison<f64>,
    pub items: Comparison<i32>,
    pub employees: EmployeeStats,
    pub low_stock: Vec<StockedProduct>,
    pub recent_transactions: Vec<Transaction>,
    pub sales_trend: Vec<TrendPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(current: i32, max: i32, threshold: i32) -> StockedProduct {
        StockedProduct {
            product_id: "P001".to_string(),
            name: "Mineral Water".to_string(),
            category: "Beverages".to_string(),
            current_stock: current,
            max_stock: max,
            low_stock_threshold: threshold,
            unit: "bottle".to_string(),
        }
    }

    #[test]
    fn test_comparison_growth() {
        let c = Comparison::between(150.0, 100.0);
        assert_eq!(c.percentage, 50.0);
        assert!(c.is_positive);
    }

    #[test]
    fn test_comparison_decline_rounds_to_one_decimal() {
        let c = Comparison::between(2, 3);
        assert_eq!(c.percentage, -33.3);
        assert!(!c.is_positive);
    }

    #[test]
    fn test_comparison_without_baseline() {
        let c = Comparison::between(80.0, 0.0);
        assert_eq!(c.today, 80.0);
        assert_eq!(c.percentage, 0.0);
        assert!(c.is_positive);
    }

    #[test]
    fn test_comparison_unchanged_is_positive() {
        let c = Comparison::between(10, 10);
        assert_eq!(c.percentage, 0.0);
        assert!(c.is_positive);
    }

    #[test]
    fn test_employee_stats() {
        assert_eq!(EmployeeStats::new(2, 3).percentage, 66.7);
        assert_eq!(EmployeeStats::new(0, 0).percentage, 0.0);
        assert_eq!(EmployeeStats::new(5, 5).percentage, 100.0);
    }

    #[test]
    fn test_stock_status_classification() {
        assert_eq!(StockStatus::classify(0, 50, 10), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(10, 50, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(3, 50, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(50, 50, 10), StockStatus::HighStock);
        assert_eq!(StockStatus::classify(60, 50, 10), StockStatus::HighStock);
        assert_eq!(StockStatus::classify(25, 50, 10), StockStatus::Completed);
    }

    #[test]
    fn test_out_of_stock_wins_over_zero_threshold() {
        assert_eq!(StockStatus::classify(0, 0, 0), StockStatus::OutOfStock);
    }

    #[test]
    fn test_threshold_ratio() {
        assert_eq!(product(5, 50, 10).threshold_ratio(), 0.5);
        assert_eq!(product(5, 50, 0).threshold_ratio(), 0.0);
        assert_eq!(product(38, 50, 10).stock_display(), "38/50");
    }

    #[test]
    fn test_daily_totals_groups_and_sorts() {
        let sales = vec![
            (Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap(), 10.0),
            (Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 0).unwrap(), 5.5),
            (Utc.with_ymd_and_hms(2025, 3, 2, 18, 30, 0).unwrap(), 4.5),
        ];

        let trend = daily_totals(&sales);

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(trend[0].amount, 5.5);
        assert_eq!(trend[1].date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(trend[1].amount, 14.5);
    }

    #[test]
    fn test_daily_totals_empty() {
        assert!(daily_totals(&[]).is_empty());
    }
}
