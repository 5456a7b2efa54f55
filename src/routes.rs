//! Top-level router combining pages, the JSON API and static assets.
//!
//! # Route Structure
//!
//! - `GET  /`, `GET /login`   - Login page (public)
//! - `POST /login/submit`     - Credential submission (strict rate limit)
//! - `GET|POST /logout`       - Sign out (POST checks the form token)
//! - `GET  /dashboard`        - Dashboard (session token required, redirects)
//! - `GET  /inventory`        - Product catalogue (Manager, Sales)
//! - `GET  /report`           - Sales report (Manager)
//! - `GET  /health`           - Health check: database, identity, sessions
//! - `/api/*`                 - JSON API (session token required, 401)
//! - `/static/*`              - Static assets
//! - anything else            - `404` JSON
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Sessions** - `tower-sessions` cookie and store
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::http::Uri;
use axum::routing::get;
use serde_json::json;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;
use tower_sessions::SessionManagerLayer;

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::error::AppError;
use crate::infrastructure::session::SessionBackend;
use crate::state::AppState;
use crate::web;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `sessions` - session middleware built by [`crate::infrastructure::session::layer`]
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(
    state: AppState,
    sessions: SessionManagerLayer<SessionBackend>,
    behind_proxy: bool,
) -> NormalizePath<Router> {
    let pages = Router::new()
        .merge(rate_limit::apply(
            web::routes::public_routes(),
            behind_proxy,
        ))
        .merge(rate_limit::apply_login(
            web::routes::login_routes(),
            behind_proxy,
        ))
        .merge(rate_limit::apply(
            web::routes::protected_routes(&state),
            behind_proxy,
        ));

    let api_router = rate_limit::apply(api::routes::protected_routes(), behind_proxy);

    let router = assemble(state, sessions, pages, api_router);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Same routes and middleware as [`app_router`] minus rate limiting and
/// path normalization.
///
/// The rate limiter keys on the peer address from `ConnectInfo`, which
/// in-process transports do not provide.
pub fn router_without_rate_limits(
    state: AppState,
    sessions: SessionManagerLayer<SessionBackend>,
) -> Router {
    let pages = Router::new()
        .merge(web::routes::public_routes())
        .merge(web::routes::login_routes())
        .merge(web::routes::protected_routes(&state));

    assemble(state, sessions, pages, api::routes::protected_routes())
}

fn assemble(
    state: AppState,
    sessions: SessionManagerLayer<SessionBackend>,
    pages: Router<AppState>,
    api_router: Router<AppState>,
) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(pages)
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found)
        .layer(sessions)
        .with_state(state)
        .layer(tracing::layer())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found("Not found", json!({ "path": uri.path() }))
}
