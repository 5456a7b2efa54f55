//! Login and logout against the hosted authentication service.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use validator::Validate;

use crate::domain::entities::AuthSession;
use crate::domain::identity::{AuthError, IdentityProvider};

/// Form input after trimming, checked before any outbound call.
#[derive(Validate)]
struct LoginCredentials {
    #[validate(length(min = 1))]
    email: String,
    #[validate(length(min = 1))]
    password: String,
}

/// Why a login did not produce a session.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Email and password are required.")]
    MissingCredentials,

    #[error(transparent)]
    Provider(#[from] AuthError),
}

impl LoginError {
    /// Message shown to the user on the login page.
    pub fn user_message(&self) -> String {
        match self {
            LoginError::MissingCredentials => "Email and password are required.".to_string(),
            LoginError::Provider(AuthError::InvalidCredentials) => {
                "Invalid email or password. Please check your credentials.".to_string()
            }
            LoginError::Provider(AuthError::EmailNotConfirmed) => {
                "Please confirm your email before logging in.".to_string()
            }
            LoginError::Provider(AuthError::Network(_)) => {
                "Network error. Please check your internet connection.".to_string()
            }
            LoginError::Provider(AuthError::RateLimited) => {
                "Too many login attempts. Please wait and try again.".to_string()
            }
            LoginError::Provider(other) => format!("Login failed: {}", other),
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            LoginError::MissingCredentials => "missing_credentials",
            LoginError::Provider(AuthError::InvalidCredentials) => "invalid_credentials",
            LoginError::Provider(AuthError::EmailNotConfirmed) => "email_not_confirmed",
            LoginError::Provider(AuthError::RateLimited) => "rate_limited",
            LoginError::Provider(AuthError::Network(_)) => "network_error",
            LoginError::Provider(AuthError::Configuration(_)) => "configuration_error",
            LoginError::Provider(_) => "provider_error",
        }
    }
}

fn record_login(outcome: &'static str) {
    metrics::counter!("auth_login_attempts_total", "outcome" => outcome).increment(1);
}

/// Service forwarding credentials to the identity provider.
///
/// It never sees password hashes or validates tokens itself; a successful
/// call returns the provider's [`AuthSession`] for the caller to store.
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Signs a user in with email and password.
    ///
    /// The email is trimmed; the password is passed through untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::MissingCredentials`] without contacting the
    /// provider when either field is empty, otherwise the provider's error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, LoginError> {
        let credentials = LoginCredentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        if credentials.validate().is_err() {
            record_login(LoginError::MissingCredentials.outcome());
            return Err(LoginError::MissingCredentials);
        }

        info!(email = %credentials.email, "Login attempt");

        match self
            .provider
            .sign_in_with_password(&credentials.email, &credentials.password)
            .await
        {
            Ok(session) => {
                info!(email = %credentials.email, user_id = %session.user_id, "Login successful");
                record_login("success");
                Ok(session)
            }
            Err(e) => {
                let e = LoginError::from(e);
                match e {
                    LoginError::Provider(AuthError::InvalidCredentials)
                    | LoginError::Provider(AuthError::EmailNotConfirmed) => {
                        warn!(email = %credentials.email, "Login rejected: {}", e)
                    }
                    _ => error!(email = %credentials.email, "Login error: {}", e),
                }
                record_login(e.outcome());
                Err(e)
            }
        }
    }

    /// Revokes the provider session if a token is known.
    ///
    /// Best effort: failures are logged and the local logout proceeds.
    pub async fn logout(&self, access_token: Option<&str>) {
        metrics::counter!("auth_logout_total").increment(1);

        let Some(token) = access_token else {
            return;
        };

        if let Err(e) = self.provider.sign_out(token).await {
            warn!("Provider sign-out failed: {}", e);
        }
    }

    pub async fn provider_healthy(&self) -> bool {
        self.provider.health_check().await
    }
}
