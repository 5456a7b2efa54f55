//! Navigation bar state shared by the signed-in pages.

use tower_sessions::Session;

use crate::domain::entities::{Permissions, Role};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::session::CurrentUser;

/// Shown in the badge when the user has no recognised role.
pub const FALLBACK_ROLE_LABEL: &str = "Employee";

/// Rendered by `topbar.html`.
pub struct PageChrome {
    pub user_email: String,
    pub role: String,
    pub permissions: Permissions,
    /// Token for the logout form.
    pub csrf_token: String,
    /// Nav entry to highlight: `dashboard`, `inventory` or `report`.
    pub active: &'static str,
}

impl PageChrome {
    pub fn new(
        user: &CurrentUser,
        role: Option<Role>,
        csrf_token: String,
        active: &'static str,
    ) -> Self {
        Self {
            user_email: user.email.clone(),
            role: role
                .map(|r| r.to_string())
                .unwrap_or_else(|| FALLBACK_ROLE_LABEL.to_string()),
            permissions: Permissions::for_role(role),
            csrf_token,
            active,
        }
    }

    /// Resolves the user's role and issues the form token.
    pub async fn load(
        state: &AppState,
        user: &CurrentUser,
        session: &Session,
        active: &'static str,
    ) -> Result<Self, AppError> {
        let role = state.access_service.role_for(&user.email).await;
        let csrf_token = state.csrf.issue(session).await?;
        Ok(Self::new(user, role, csrf_token, active))
    }
}
