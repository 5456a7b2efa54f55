//! Business logic services for the application layer.

pub mod access_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod inventory_service;
pub mod report_service;

pub use access_service::AccessService;
pub use auth_service::{AuthService, LoginError};
pub use dashboard_service::DashboardService;
pub use inventory_service::InventoryService;
pub use report_service::ReportService;
