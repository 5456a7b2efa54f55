//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with dependency checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All dependencies reachable
/// - **503 Service Unavailable**: One or more dependencies degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "identity": { "status": "ok", "message": "Authentication service reachable" },
///     "sessions": { "status": "ok", "message": "redis store reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (database, identity, sessions) = tokio::join!(
        check_database(&state),
        check_identity(&state),
        check_sessions(&state)
    );

    let all_healthy = database.is_ok() && identity.is_ok() && sessions.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            identity,
            sessions,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.dashboard_service.database_healthy().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

async fn check_identity(state: &AppState) -> CheckStatus {
    if state.auth_service.provider_healthy().await {
        CheckStatus::ok("Authentication service reachable")
    } else {
        CheckStatus::error("Authentication service unreachable")
    }
}

async fn check_sessions(state: &AppState) -> CheckStatus {
    let kind = state.sessions.kind();
    if state.sessions.health_check().await {
        CheckStatus::ok(format!("{} store reachable", kind))
    } else {
        CheckStatus::error(format!("{} store unreachable", kind))
    }
}
