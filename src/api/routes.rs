//! JSON API route configuration.

use axum::{Router, routing::get};

use crate::api::handlers::{metrics_handler, report_handler};
use crate::state::AppState;

/// API routes, nested under `/api`.
///
/// Session-gated through the [`crate::web::session::CurrentUser`]
/// extractor, which answers `401` JSON instead of redirecting.
///
/// # Endpoints
///
/// - `GET /metrics` - Dashboard metrics
/// - `GET /report` - Sales report (Manager)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/report", get(report_handler))
}
