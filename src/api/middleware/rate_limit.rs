//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

type Limiter<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for general endpoints.
///
/// # Limits
///
/// - **Rate**: one request replenished every 2 seconds
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer<K>(key_extractor: K) -> Limiter<K>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(100)
            .key_extractor(key_extractor)
            .finish()
            .expect("static rate limit configuration is valid"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a stricter rate limiter for credential submission.
///
/// # Limits
///
/// - **Rate**: one request replenished every 6 seconds
/// - **Burst**: 5 requests
pub fn login_layer<K>(key_extractor: K) -> Limiter<K>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(6)
            .burst_size(5)
            .key_extractor(key_extractor)
            .finish()
            .expect("static rate limit configuration is valid"),
    );

    GovernorLayer::new(governor_conf)
}

/// Applies the general limiter, keyed on the client IP.
///
/// Behind a reverse proxy the IP comes from `X-Forwarded-For` / `X-Real-IP`,
/// otherwise from the socket peer address. Requires the server to be started
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn apply(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(layer(SmartIpKeyExtractor))
    } else {
        router.layer(layer(PeerIpKeyExtractor))
    }
}

/// Applies the login limiter, keyed like [`apply`].
pub fn apply_login(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(login_layer(SmartIpKeyExtractor))
    } else {
        router.layer(login_layer(PeerIpKeyExtractor))
    }
}
