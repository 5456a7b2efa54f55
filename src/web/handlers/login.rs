//! Login page and form submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, FlashLevel, FlashMessage};
use crate::web::session::{CurrentUser, store_auth_session};

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    messages: Vec<FlashMessage>,
    csrf_token: String,
}

/// Submitted login form. Missing fields deserialize as empty strings.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

/// Renders the login form.
///
/// # Endpoint
///
/// `GET /` and `GET /login`
///
/// Signed-in users are sent straight to `/dashboard`.
pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    if CurrentUser::from_session(&session).await?.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let messages = flash::take(&session).await?;
    let csrf_token = state.csrf.issue(&session).await?;

    Ok(LoginTemplate {
        messages,
        csrf_token,
    }
    .into_response())
}

/// Handles the login form.
///
/// # Endpoint
///
/// `POST /login/submit`
///
/// On success the session id is cycled, the provider session is stored and
/// the user is redirected to `/dashboard`. Every failure redirects back to
/// `/login` with an error message.
pub async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    if !state.csrf.verify(&session, &form.csrf_token).await? {
        tracing::warn!("Login form rejected: invalid CSRF token");
        flash::push(
            &session,
            FlashLevel::Error,
            "Your form expired. Please try again.",
        )
        .await?;
        return Ok(Redirect::to("/login"));
    }

    match state.auth_service.login(&form.email, &form.password).await {
        Ok(auth) => {
            store_auth_session(&session, &auth).await?;
            flash::push(&session, FlashLevel::Success, "Login successful!").await?;
            Ok(Redirect::to("/dashboard"))
        }
        Err(e) => {
            flash::push(&session, FlashLevel::Error, e.user_message()).await?;
            Ok(Redirect::to("/login"))
        }
    }
}
