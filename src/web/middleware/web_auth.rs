//! Session gate for dashboard pages.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::web::flash::{self, FlashLevel};
use crate::web::session::CurrentUser;

/// Lets the request through only when the session holds a session token.
///
/// Unlike the JSON API, which answers `401 Unauthorized`, pages redirect to
/// `/login` with a warning so the browser lands on the form. On success the
/// [`CurrentUser`] is added to the request extensions.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/dashboard", get(dashboard_handler))
///     .layer(middleware::from_fn(web_auth::layer));
/// ```
pub async fn layer(session: Session, mut req: Request, next: Next) -> Result<Response, AppError> {
    match CurrentUser::from_session(&session).await? {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "No session token, redirecting to login");
            flash::push(
                &session,
                FlashLevel::Warning,
                "Please login to access the dashboard.",
            )
            .await?;
            Ok(Redirect::to("/login").into_response())
        }
    }
}
