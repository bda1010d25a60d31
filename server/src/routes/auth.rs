//! Auth routes: sign-in, sign-up, session lookup, logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser never talks to the hosted identity provider directly. These
//! handlers proxy credentials to it and keep the issued tokens in HttpOnly
//! cookies, so `/api/auth/me` can tell "no session" (401) apart from "the
//! provider could not be asked" (502).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::services::identity::{IdentityError, ProviderSession, ProviderUser, SignUpResult};
use crate::state::AppState;

pub(crate) const ACCESS_COOKIE: &str = "journey_access";
pub(crate) const REFRESH_COOKIE: &str = "journey_refresh";
const REFRESH_MAX_AGE: Duration = Duration::days(30);
pub(crate) const INCOMPLETE_CREDENTIALS: &str = "Enter both email and password.";

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
pub struct CredentialsBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User record as the browser sees it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}

impl From<&ProviderUser> for SessionUser {
    fn from(user: &ProviderUser) -> Self {
        Self { id: user.id.clone(), email: user.email.clone() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpBody {
    pub user: SessionUser,
    pub confirmation_pending: bool,
}

// =============================================================================
// HELPERS
// =============================================================================

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Status for a failed provider call. Rejections map to `rejected`; anything
/// that kept us from getting an answer is a bad gateway.
fn failure_status(err: &IdentityError, rejected: StatusCode) -> StatusCode {
    match err {
        IdentityError::Rejected { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
        IdentityError::Rejected { .. } => rejected,
        IdentityError::Unavailable(_) | IdentityError::Malformed(_) => StatusCode::BAD_GATEWAY,
        IdentityError::HttpClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure_response(err: &IdentityError, rejected: StatusCode) -> Response {
    error_response(failure_status(err, rejected), &err.user_message())
}

fn session_cookie(name: &'static str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

fn with_session(jar: CookieJar, session: &ProviderSession, secure: bool) -> CookieJar {
    let access_age = session
        .expires_in
        .and_then(|secs| i64::try_from(secs).ok())
        .map_or(Duration::hours(1), Duration::seconds);
    let jar = jar.add(session_cookie(ACCESS_COOKIE, session.access_token.clone(), access_age, secure));
    if session.refresh_token.is_empty() {
        return jar;
    }
    jar.add(session_cookie(REFRESH_COOKIE, session.refresh_token.clone(), REFRESH_MAX_AGE, secure))
}

fn without_session(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, String::new(), Duration::ZERO, secure))
        .add(session_cookie(REFRESH_COOKIE, String::new(), Duration::ZERO, secure))
}

fn cookie_value<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(Cookie::value).filter(|value| !value.is_empty())
}

fn validate(body: &CredentialsBody) -> Option<(&str, &str)> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return None;
    }
    Some((email, body.password.as_str()))
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/sign-in`: exchange credentials for session cookies.
pub async fn sign_in(State(state): State<AppState>, jar: CookieJar, Json(body): Json<CredentialsBody>) -> Response {
    let Some((email, password)) = validate(&body) else {
        return error_response(StatusCode::BAD_REQUEST, INCOMPLETE_CREDENTIALS);
    };

    match state.identity.sign_in(email, password).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user.id, "sign-in succeeded");
            let jar = with_session(jar, &session, state.cookie_secure);
            (jar, Json(SessionUser::from(&session.user))).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "sign-in failed");
            failure_response(&e, StatusCode::UNAUTHORIZED)
        }
    }
}

/// `POST /api/auth/sign-up`: register an account; signs in when the provider
/// issues a session right away.
pub async fn sign_up(State(state): State<AppState>, jar: CookieJar, Json(body): Json<CredentialsBody>) -> Response {
    let Some((email, password)) = validate(&body) else {
        return error_response(StatusCode::BAD_REQUEST, INCOMPLETE_CREDENTIALS);
    };

    match state.identity.sign_up(email, password).await {
        Ok(SignUpResult::Session(session)) => {
            tracing::info!(user_id = %session.user.id, "sign-up succeeded");
            let jar = with_session(jar, &session, state.cookie_secure);
            let body = SignUpBody { user: SessionUser::from(&session.user), confirmation_pending: false };
            (jar, Json(body)).into_response()
        }
        Ok(SignUpResult::ConfirmationPending(user)) => {
            tracing::info!(user_id = %user.id, "sign-up awaiting email confirmation");
            Json(SignUpBody { user: SessionUser::from(&user), confirmation_pending: true }).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "sign-up failed");
            failure_response(&e, StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

/// `GET /api/auth/me`: resolve the current user, refreshing an expired
/// access token once.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Response {
    let secure = state.cookie_secure;

    if let Some(access) = cookie_value(&jar, ACCESS_COOKIE) {
        match state.identity.get_user(access).await {
            Ok(Some(user)) => return Json(SessionUser::from(&user)).into_response(),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "session lookup failed");
                return failure_response(&e, StatusCode::BAD_GATEWAY);
            }
        }
    }

    let Some(refresh) = cookie_value(&jar, REFRESH_COOKIE).map(str::to_owned) else {
        return (without_session(jar, secure), StatusCode::UNAUTHORIZED).into_response();
    };

    match state.identity.refresh(&refresh).await {
        Ok(Some(session)) => {
            tracing::debug!(user_id = %session.user.id, "session refreshed");
            let jar = with_session(jar, &session, secure);
            (jar, Json(SessionUser::from(&session.user))).into_response()
        }
        Ok(None) => (without_session(jar, secure), StatusCode::UNAUTHORIZED).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "session refresh failed");
            failure_response(&e, StatusCode::BAD_GATEWAY)
        }
    }
}

/// `POST /api/auth/logout`: revoke the provider session and clear cookies.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(access) = cookie_value(&jar, ACCESS_COOKIE)
        && let Err(e) = state.identity.sign_out(access).await
    {
        tracing::warn!(error = %e, "provider sign-out failed; clearing cookies anyway");
    }

    (without_session(jar, state.cookie_secure), StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
