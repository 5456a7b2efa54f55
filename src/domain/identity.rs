//! Contract for the hosted authentication service.
//!
//! Credential verification, token issuance and password storage all happen
//! on the provider side. This service forwards credentials and keeps the
//! returned [`AuthSession`].

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::AuthSession;

/// Failures reported by an [`IdentityProvider`].
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("Rate limited by authentication service")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication service returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The client was set up with an unusable URL or HTTP settings.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Whether a retry could succeed without any change on the caller side.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::Network(_))
    }
}

/// Hosted identity provider reached over the network.
///
/// # Implementations
///
/// - [`crate::infrastructure::identity::GoTrueClient`] - GoTrue / Supabase Auth REST API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchanges an email and password for a session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] when the provider rejects the pair
    /// - [`AuthError::EmailNotConfirmed`] when the account is not verified yet
    /// - [`AuthError::Network`] when the provider could not be reached
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Revokes the session behind `access_token` on the provider side.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// Checks that the provider is reachable.
    async fn health_check(&self) -> bool;
}
