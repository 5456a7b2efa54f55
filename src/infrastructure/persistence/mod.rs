//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries. The schema is owned by the hosted backend; `./migrations`
//! reproduces it for local development and tests.
//!
//! # Repositories
//!
//! - [`PgMetricsRepository`] - Sales, stock and staff aggregates
//! - [`PgEmployeeRepository`] - Role lookup by email
//! - [`PgInventoryRepository`] - Product catalogue
//! - [`PgReportRepository`] - Turnover and monthly revenue

pub mod pg_employee_repository;
pub mod pg_inventory_repository;
pub mod pg_metrics_repository;
pub mod pg_report_repository;

pub use pg_employee_repository::PgEmployeeRepository;
pub use pg_inventory_repository::PgInventoryRepository;
pub use pg_metrics_repository::PgMetricsRepository;
pub use pg_report_repository::PgReportRepository;
