//! Role gate for pages restricted to some roles.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::application::services::AccessService;
use crate::domain::entities::{Permission, Role, has_permission};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, FlashLevel};
use crate::web::session::CurrentUser;

/// The permission one route requires, with the service resolving roles.
#[derive(Clone)]
pub struct PermissionGate {
    access: Arc<AccessService>,
    permission: Permission,
}

impl PermissionGate {
    pub fn new(state: &AppState, permission: Permission) -> Self {
        Self {
            access: state.access_service.clone(),
            permission,
        }
    }

    fn denied_message(&self) -> String {
        let roles: Vec<&str> = self
            .permission
            .granted_to()
            .iter()
            .map(Role::as_str)
            .collect();
        format!(
            "Access denied. This page is restricted to {} only.",
            roles.join(", ")
        )
    }
}

/// Lets the request through only when the user's role grants the gate's
/// permission; otherwise redirects to `/dashboard` with an error message.
///
/// Runs inside [`super::web_auth::layer`], which supplies the
/// [`CurrentUser`]. The resolved [`Role`] is added to the request
/// extensions.
///
/// # Example
///
/// ```rust,ignore
/// let reports = Router::new()
///     .route("/report", get(report_handler))
///     .route_layer(middleware::from_fn_with_state(
///         PermissionGate::new(&state, Permission::ViewReports),
///         require_permission::layer,
///     ));
/// ```
pub async fn layer(
    State(gate): State<PermissionGate>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(email) = req.extensions().get::<CurrentUser>().map(|u| u.email.clone()) else {
        flash::push(
            &session,
            FlashLevel::Warning,
            "Please login to access this page.",
        )
        .await?;
        return Ok(Redirect::to("/login").into_response());
    };

    let Some(role) = gate.access.role_for(&email).await else {
        tracing::warn!(email = %email, path = %req.uri().path(), "No role for user");
        flash::push(
            &session,
            FlashLevel::Error,
            "Unable to determine your role. Please contact administrator.",
        )
        .await?;
        return Ok(Redirect::to("/dashboard").into_response());
    };

    if !has_permission(Some(role), gate.permission) {
        tracing::info!(email = %email, %role, path = %req.uri().path(), "Page access denied");
        flash::push(&session, FlashLevel::Error, gate.denied_message()).await?;
        return Ok(Redirect::to("/dashboard").into_response());
    }

    req.extensions_mut().insert(role);
    Ok(next.run(req).await)
}
