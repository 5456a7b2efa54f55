//! GoTrue (Supabase Auth) REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::AuthSession;
use crate::domain::identity::{AuthError, IdentityProvider};

/// Header carrying the project's public API key.
const API_KEY_HEADER: &str = "apikey";

/// Retry delays start at 100 ms and double up to [`MAX_BACKOFF`]:
/// the n-th delay is `BACKOFF_FACTOR * BACKOFF_BASE^n` milliseconds.
const BACKOFF_BASE: u64 = 2;
const BACKOFF_FACTOR: u64 = 50;

/// Upper bound for a single retry delay.
const MAX_BACKOFF: Duration = Duration::from_secs(2);

/// Maximum length of provider error text kept in messages.
const MAX_ERROR_BODY_LENGTH: usize = 300;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    user: Option<TokenUser>,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

/// Error payload. Older GoTrue releases use `error`/`error_description`,
/// newer ones `error_code`/`msg`.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
    error_code: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl ErrorResponse {
    fn text(&self) -> String {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.message.as_deref())
            .or(self.error.as_deref())
            .unwrap_or("")
            .to_string()
    }
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", &body[..end])
}

/// Maps a non-success token response to an [`AuthError`].
fn classify_error(status: StatusCode, body: &str) -> AuthError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return AuthError::RateLimited;
    }

    let parsed: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
    let text = parsed.text();
    let lowered = text.to_lowercase();
    let code = parsed.error_code.as_deref().unwrap_or("");

    if code == "email_not_confirmed" || lowered.contains("email not confirmed") {
        return AuthError::EmailNotConfirmed;
    }

    if code == "invalid_credentials"
        || parsed.error.as_deref() == Some("invalid_grant")
        || lowered.contains("invalid login credentials")
    {
        return AuthError::InvalidCredentials;
    }

    let message = if text.is_empty() {
        truncate(body)
    } else {
        truncate(&text)
    };

    AuthError::Provider {
        status: status.as_u16(),
        message,
    }
}

fn network_error(e: reqwest::Error) -> AuthError {
    AuthError::Network(e.to_string())
}

/// Client for a GoTrue-compatible authentication API.
///
/// Clone is cheap: `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct GoTrueClient {
    client: Client,
    base_url: Url,
    api_key: String,
    max_retries: usize,
}

impl GoTrueClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if the URL cannot be parsed or
    /// the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
        max_retries: usize,
    ) -> Result<Self, AuthError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| AuthError::Configuration(format!("Invalid auth URL: {}", e)))?;

        // Url::join drops the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            max_retries,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path)
            .map_err(|e| AuthError::Configuration(format!("Invalid endpoint {}: {}", path, e)))
    }

    async fn request_token(&self, email: &str, password: &str) -> Result<Response, AuthError> {
        let url = self.endpoint("auth/v1/token")?;

        self.client
            .post(url)
            .query(&[("grant_type", "password")])
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(network_error)
    }
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let strategy = ExponentialBackoff::from_millis(BACKOFF_BASE)
            .factor(BACKOFF_FACTOR)
            .max_delay(MAX_BACKOFF)
            .map(jitter)
            .take(self.max_retries);

        let response = RetryIf::spawn(
            strategy,
            || self.request_token(email, password),
            |e: &AuthError| {
                let retry = e.is_transient();
                if retry {
                    warn!("Auth service unreachable, retrying: {}", e);
                }
                retry
            },
        )
        .await?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Token request rejected");
            return Err(classify_error(status, &body));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::InvalidResponse(format!("Malformed token response: {}", e)))?;

        let user = token
            .user
            .ok_or_else(|| AuthError::InvalidResponse("No user in response".to_string()))?;
        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidResponse("No access token in response".to_string()))?;

        Ok(AuthSession {
            user_id: user.id,
            email: user.email.unwrap_or_else(|| email.to_string()),
            access_token,
            refresh_token: token.refresh_token,
            expires_at: token.expires_at,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.endpoint("auth/v1/logout")?;

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        // An expired or unknown token is already signed out.
        if status.is_success() || status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND
        {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_error(status, &body))
    }

    async fn health_check(&self) -> bool {
        let Ok(url) = self.endpoint("auth/v1/health") else {
            return false;
        };

        match self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Auth health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_invalid_grant() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, body),
            AuthError::InvalidCredentials
        ));
    }

    #[test]
    fn test_classify_invalid_credentials_code() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, body),
            AuthError::InvalidCredentials
        ));
    }

    #[test]
    fn test_classify_email_not_confirmed() {
        let legacy = r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#;
        let current = r#"{"code":400,"error_code":"email_not_confirmed","msg":"Email not confirmed"}"#;

        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, legacy),
            AuthError::EmailNotConfirmed
        ));
        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, current),
            AuthError::EmailNotConfirmed
        ));
    }

    #[test]
    fn test_classify_rate_limit() {
        assert!(matches!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, ""),
            AuthError::RateLimited
        ));
    }

    #[test]
    fn test_classify_other_status_keeps_message() {
        match classify_error(StatusCode::INTERNAL_SERVER_ERROR, r#"{"msg":"database down"}"#) {
            AuthError::Provider { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_classify_non_json_body_is_truncated() {
        let body = "x".repeat(1000);
        match classify_error(StatusCode::BAD_GATEWAY, &body) {
            AuthError::Provider { message, .. } => {
                assert!(message.len() < 400);
                assert!(message.ends_with("(truncated)"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client =
            GoTrueClient::new("https://demo.supabase.co/prefix", "key", Duration::from_secs(1), 0)
                .unwrap();

        assert_eq!(
            client.endpoint("auth/v1/token").unwrap().as_str(),
            "https://demo.supabase.co/prefix/auth/v1/token"
        );
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        assert!(matches!(
            GoTrueClient::new("not a url", "key", Duration::from_secs(1), 0),
            Err(AuthError::Configuration(_))
        ));
    }
}
