//! Session keys written on login and the signed-in user extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde_json::json;
use tower_sessions::Session;

use crate::domain::entities::AuthSession;
use crate::error::AppError;

pub const USER_ID_KEY: &str = "user_id";
pub const USER_EMAIL_KEY: &str = "user_email";
/// The session token gating protected pages.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const EXPIRES_AT_KEY: &str = "expires_at";

/// Writes the provider session into the server-side session.
///
/// The session id is cycled first so an id issued before login cannot be
/// reused afterwards.
pub async fn store_auth_session(session: &Session, auth: &AuthSession) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, &auth.user_id).await?;
    session.insert(USER_EMAIL_KEY, &auth.email).await?;
    session.insert(ACCESS_TOKEN_KEY, &auth.access_token).await?;
    if let Some(ref refresh) = auth.refresh_token {
        session.insert(REFRESH_TOKEN_KEY, refresh).await?;
    }
    if let Some(expires_at) = auth.expires_at {
        session.insert(EXPIRES_AT_KEY, expires_at).await?;
    }
    Ok(())
}

/// The signed-in user, present iff the session holds a session token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

impl CurrentUser {
    /// Reads the user from the session, `None` when no token is stored.
    pub async fn from_session(session: &Session) -> Result<Option<Self>, AppError> {
        let Some(access_token) = session.get::<String>(ACCESS_TOKEN_KEY).await? else {
            return Ok(None);
        };

        let user_id = session.get::<String>(USER_ID_KEY).await?.unwrap_or_default();
        let email = session
            .get::<String>(USER_EMAIL_KEY)
            .await?
            .unwrap_or_else(|| "User".to_string());

        Ok(Some(Self {
            user_id,
            email,
            access_token,
        }))
    }
}

/// Rejects with `401 Unauthorized` JSON when no session token is present.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::internal("Session layer missing", json!({})))?;

        Self::from_session(&session).await?.ok_or_else(|| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "No active session" }))
        })
    }
}
