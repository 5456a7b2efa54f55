//! Server-side session storage and the session cookie layer.
//!
//! The portal keeps the provider's session token in a `tower-sessions`
//! record; the browser only holds the random session id cookie.

mod backend;
mod redis_store;

pub use backend::SessionBackend;

use time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};

/// Name of the session id cookie.
pub const SESSION_COOKIE_NAME: &str = "smartretail_session";

/// Builds the session middleware.
///
/// Cookies are `HttpOnly` and `SameSite=Lax`; sessions expire after
/// `ttl_seconds` without activity.
pub fn layer(
    backend: SessionBackend,
    ttl_seconds: u64,
    secure: bool,
) -> SessionManagerLayer<SessionBackend> {
    let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);

    SessionManagerLayer::new(backend)
        .with_name(SESSION_COOKIE_NAME)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(secure)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(ttl)))
}
