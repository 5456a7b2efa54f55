//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`MetricsRepository`] - Sales, stock and staff aggregates
//! - [`EmployeeRepository`] - Role lookup by email
//! - [`InventoryRepository`] - Product catalogue
//! - [`ReportRepository`] - Turnover and monthly revenue

pub mod employee_repository;
pub mod inventory_repository;
pub mod metrics_repository;
pub mod report_repository;

pub use employee_repository::EmployeeRepository;
pub use inventory_repository::InventoryRepository;
pub use metrics_repository::MetricsRepository;
pub use report_repository::ReportRepository;

#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
#[cfg(test)]
pub use metrics_repository::MockMetricsRepository;
#[cfg(test)]
pub use report_repository::MockReportRepository;
