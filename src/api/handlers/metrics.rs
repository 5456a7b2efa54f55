//! Handler for dashboard metrics as JSON.

use axum::{Json, extract::State};

use crate::domain::entities::DashboardMetrics;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::session::CurrentUser;

/// Returns the figures shown on the dashboard.
///
/// # Endpoint
///
/// `GET /api/metrics`
///
/// # Errors
///
/// - `401 Unauthorized` when the session carries no session token
/// - `500 Internal Server Error` when the metrics query fails
pub async fn metrics_handler(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardMetrics>, AppError> {
    tracing::debug!(email = %user.email, "Serving dashboard metrics");
    let metrics = state.dashboard_service.metrics().await?;
    Ok(Json(metrics))
}
