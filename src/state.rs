//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::{
    AccessService, AuthService, DashboardService, InventoryService, ReportService,
};
use crate::infrastructure::session::SessionBackend;
use crate::web::csrf::CsrfGuard;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub dashboard_service: Arc<DashboardService>,
    pub inventory_service: Arc<InventoryService>,
    pub report_service: Arc<ReportService>,
    pub access_service: Arc<AccessService>,
    pub csrf: Arc<CsrfGuard>,
    /// Session backend, kept for health checks.
    pub sessions: SessionBackend,
}
