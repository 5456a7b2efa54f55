//! HTML page route configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::entities::Permission;
use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, inventory_handler, login_page, login_submit, logout_handler,
    logout_submit, report_handler,
};
use crate::web::middleware::require_permission::{self, PermissionGate};
use crate::web::middleware::web_auth;

/// Pages reachable without a session.
///
/// # Endpoints
///
/// - `GET /` - Login page
/// - `GET /login` - Login page
/// - `GET /logout` - Sign out and return to the login page
/// - `POST /logout` - Same, from the CSRF-protected logout button
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page))
        .route("/login", get(login_page))
        .route("/logout", get(logout_handler).post(logout_submit))
}

/// The login form target, kept separate so it can carry a stricter rate limit.
///
/// # Endpoints
///
/// - `POST /login/submit` - Credential submission
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login/submit", post(login_submit))
}

fn gated(state: &AppState, permission: Permission, router: Router<AppState>) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        PermissionGate::new(state, permission),
        require_permission::layer,
    ))
}

/// Pages requiring a session token.
///
/// # Endpoints
///
/// - `GET /dashboard` - Retail dashboard
/// - `GET /inventory` - Product catalogue (Manager, Sales)
/// - `GET /report` - Sales report (Manager)
pub fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .merge(gated(
            state,
            Permission::ViewInventory,
            Router::new().route("/inventory", get(inventory_handler)),
        ))
        .merge(gated(
            state,
            Permission::ViewReports,
            Router::new().route("/report", get(report_handler)),
        ))
        .layer(middleware::from_fn(web_auth::layer))
}
