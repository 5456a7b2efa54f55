//! Handler for the sales report as JSON.

use axum::{Json, extract::State};
use serde_json::json;

use crate::domain::entities::{Permission, SalesReport};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::session::CurrentUser;

/// Returns the figures shown on the report page.
///
/// # Endpoint
///
/// `GET /api/report`
///
/// # Errors
///
/// - `401 Unauthorized` when the session carries no session token
/// - `403 Forbidden` when the user's role lacks `view_reports`
/// - `500 Internal Server Error` when a report query fails
pub async fn report_handler(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<SalesReport>, AppError> {
    if !state
        .access_service
        .check_permission(&user.email, Permission::ViewReports)
        .await
    {
        return Err(AppError::forbidden(
            "Access denied",
            json!({ "required": "view_reports" }),
        ));
    }

    let report = state.report_service.report().await?;
    Ok(Json(report))
}
