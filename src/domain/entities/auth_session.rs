//! Session issued by the hosted authentication service.

use serde::{Deserialize, Serialize};

/// Result of a successful password sign-in.
///
/// The `access_token` is the session token that gates protected pages.
/// It is opaque to this service and never inspected locally.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp at which the provider considers the access token expired.
    pub expires_at: Option<i64>,
}

impl AuthSession {
    /// Creates a session with only the mandatory fields set.
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("access_token", &"***")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_tokens() {
        let mut session = AuthSession::new("u-1", "a@b.com", "secret-access");
        session.refresh_token = Some("secret-refresh".to_string());

        let rendered = format!("{:?}", session);

        assert!(rendered.contains("a@b.com"));
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
    }
}
