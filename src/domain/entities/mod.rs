//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`AuthSession`] - Session issued by the hosted authentication service
//! - [`Role`] / [`Permissions`] - Employee role and what it grants
//! - [`DashboardMetrics`] - Aggregated sales, stock and staff figures
//! - [`InventoryListing`] - Product catalogue with category counts
//! - [`SalesReport`] - Best sellers, period totals and monthly revenue

pub mod auth_session;
pub mod inventory;
pub mod metrics;
pub mod report;
pub mod role;

pub use auth_session::AuthSession;
pub use inventory::{CategoryCount, InventoryFilter, InventoryListing, Product, order_categories};
pub use metrics::{
    Comparison, DashboardMetrics, EmployeeStats, StockStatus, StockedProduct, Transaction,
    TrendPoint, daily_totals,
};
pub use report::{
    BestCategory, BestSeller, CategoryTurnover, MonthlyRevenue, PeriodTotals, ProductTurnover,
    ReportPeriod, SalesReport, growth_percentage, month_start,
};
pub use role::{Permission, Permissions, Role, has_permission};
