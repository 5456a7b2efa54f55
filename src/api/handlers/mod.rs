//! HTTP request handlers for JSON endpoints.

pub mod health;
pub mod metrics;
pub mod report;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use report::report_handler;
