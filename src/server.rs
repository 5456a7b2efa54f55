//! HTTP server initialization and runtime setup.
//!
//! Wires the database pool, session store and identity client into the
//! router and runs Axum until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::application::services::{
    AccessService, AuthService, DashboardService, InventoryService, ReportService,
};
use crate::config::Config;
use crate::infrastructure::identity::GoTrueClient;
use crate::domain::repositories::MetricsRepository;
use crate::infrastructure::persistence::{
    PgEmployeeRepository, PgInventoryRepository, PgMetricsRepository, PgReportRepository,
};
use crate::infrastructure::session::{self, SessionBackend};
use crate::routes::app_router;
use crate::state::AppState;
use crate::web::csrf::CsrfGuard;

/// Opens the PostgreSQL pool with the configured limits.
///
/// The pool connects lazily so the portal can still serve the login page
/// while the database is unreachable; `/health` reports the outage.
pub fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect_lazy(&config.database_url)
        .context("Invalid database URL")
}

/// Builds the shared state from its parts.
pub fn build_state(
    config: &Config,
    pool: Arc<PgPool>,
    sessions: SessionBackend,
) -> Result<AppState> {
    let identity = GoTrueClient::new(
        &config.auth_url,
        config.auth_anon_key.clone(),
        Duration::from_secs(config.auth_timeout_seconds),
        config.auth_max_retries,
    )
    .context("Failed to build authentication client")?;

    let metrics: Arc<dyn MetricsRepository> = Arc::new(PgMetricsRepository::new(pool.clone()));

    Ok(AppState {
        auth_service: Arc::new(AuthService::new(Arc::new(identity))),
        dashboard_service: Arc::new(DashboardService::new(metrics.clone())),
        inventory_service: Arc::new(InventoryService::new(Arc::new(
            PgInventoryRepository::new(pool.clone()),
        ))),
        report_service: Arc::new(ReportService::new(
            Arc::new(PgReportRepository::new(pool.clone())),
            metrics,
        )),
        access_service: Arc::new(AccessService::new(Arc::new(PgEmployeeRepository::new(
            pool,
        )))),
        csrf: Arc::new(CsrfGuard::new(config.secret_key.as_bytes())),
        sessions,
    })
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Session store (Redis, or in-memory fallback)
/// - Authentication service client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The database URL or auth URL is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config)?;
    tracing::info!("Database pool ready");

    let sessions = SessionBackend::connect(config.redis_url.as_deref()).await;
    let session_layer = session::layer(
        sessions.clone(),
        config.session_ttl_seconds,
        config.secure_cookies,
    );

    let state = build_state(&config, Arc::new(pool), sessions)?;

    if !state.auth_service.provider_healthy().await {
        tracing::warn!(
            "Authentication service at {} is not reachable; logins will fail until it is",
            config.auth_url
        );
    }

    let app = app_router(state, session_layer, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
