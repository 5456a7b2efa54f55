//! Logout handlers.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, FlashLevel};
use crate::web::session::ACCESS_TOKEN_KEY;

/// Submitted logout form. A missing token deserializes as empty.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LogoutForm {
    pub csrf_token: String,
}

/// Signs the user out.
///
/// # Endpoint
///
/// `GET /logout`
///
/// The provider session is revoked on a best-effort basis, then the local
/// session is flushed. Always ends on `/login`.
pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let token = session
        .get::<String>(ACCESS_TOKEN_KEY)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Could not read session during logout: {}", e);
            None
        });

    state.auth_service.logout(token.as_deref()).await;

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    flash::push(
        &session,
        FlashLevel::Success,
        "You have been logged out successfully.",
    )
    .await?;

    Ok(Redirect::to("/login"))
}

/// Handles the logout button.
///
/// # Endpoint
///
/// `POST /logout`
///
/// Signs out like [`logout_handler`] once the form token checks out.
/// A missing or stale token keeps the session and returns to `/dashboard`.
pub async fn logout_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LogoutForm>,
) -> Result<Redirect, AppError> {
    if !state.csrf.verify(&session, &form.csrf_token).await? {
        tracing::warn!("Logout form rejected: invalid CSRF token");
        flash::push(
            &session,
            FlashLevel::Error,
            "Your form expired. Please try again.",
        )
        .await?;
        return Ok(Redirect::to("/dashboard"));
    }

    logout_handler(State(state), session).await
}
