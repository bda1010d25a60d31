//! REST helpers for the same-origin auth API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs that report "not available" since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to a value instead of panicking. Failing responses are
//! decoded from the server's `{ "error": ... }` envelope so the provider's own
//! wording reaches the user unchanged.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::provider::{AuthSuccess, SessionLookup};
use super::types::{AuthError, Credentials, User};
#[cfg(any(test, feature = "hydrate"))]
use super::types::{ErrorBody, SignUpResponse};

#[cfg(feature = "hydrate")]
const SIGN_IN_ENDPOINT: &str = "/api/auth/sign-in";
#[cfg(feature = "hydrate")]
const SIGN_UP_ENDPOINT: &str = "/api/auth/sign-up";
#[cfg(feature = "hydrate")]
const SESSION_ENDPOINT: &str = "/api/auth/me";
#[cfg(feature = "hydrate")]
const LOGOUT_ENDPOINT: &str = "/api/auth/logout";

#[cfg(not(feature = "hydrate"))]
const UNAVAILABLE: &str = "not available on server";

#[cfg(any(test, feature = "hydrate"))]
fn failure_message(action: &str, status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|envelope| envelope.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("{action} failed: {status}"))
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_user_body(body: &str) -> Result<User, AuthError> {
    let user: User = serde_json::from_str(body).map_err(|e| AuthError::new(format!("unexpected response: {e}")))?;
    if !user.is_valid() {
        return Err(AuthError::new("unexpected response: user id missing"));
    }
    Ok(user)
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_sign_up_body(body: &str) -> Result<AuthSuccess, AuthError> {
    let resp: SignUpResponse =
        serde_json::from_str(body).map_err(|e| AuthError::new(format!("unexpected response: {e}")))?;
    if resp.confirmation_pending {
        return Ok(AuthSuccess::ConfirmationPending { email: resp.user.email });
    }
    if !resp.user.is_valid() {
        return Err(AuthError::new("unexpected response: user id missing"));
    }
    Ok(AuthSuccess::SignedIn(resp.user))
}

/// Classify a `/api/auth/me` response. Only 401 means "not signed in";
/// every other non-200 status is a failed lookup.
#[cfg(any(test, feature = "hydrate"))]
fn lookup_from_response(status: u16, body: &str) -> SessionLookup {
    match status {
        200 => match parse_user_body(body) {
            Ok(user) => SessionLookup::Authenticated(user),
            Err(e) => SessionLookup::LookupFailed(e),
        },
        401 => SessionLookup::Unauthenticated,
        other => SessionLookup::LookupFailed(AuthError::new(failure_message("session lookup", other, body))),
    }
}

#[cfg(feature = "hydrate")]
async fn post_json(url: &str, credentials: &Credentials) -> Result<(u16, String), AuthError> {
    let resp = gloo_net::http::Request::post(url)
        .json(credentials)
        .map_err(|e| AuthError::new(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::new(format!("could not reach server: {e}")))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|e| AuthError::new(e.to_string()))?;
    Ok((status, body))
}

/// Sign in via `POST /api/auth/sign-in`.
///
/// # Errors
///
/// Returns the provider's message when the credentials are rejected, or a
/// transport/decoding description otherwise.
pub async fn sign_in(credentials: &Credentials) -> Result<User, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let (status, body) = post_json(SIGN_IN_ENDPOINT, credentials).await?;
        if !(200..300).contains(&status) {
            return Err(AuthError::new(failure_message("sign in", status, &body)));
        }
        parse_user_body(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = credentials;
        Err(AuthError::new(UNAVAILABLE))
    }
}

/// Create an account via `POST /api/auth/sign-up`.
///
/// # Errors
///
/// Returns the provider's message when sign-up is refused, or a
/// transport/decoding description otherwise.
pub async fn sign_up(credentials: &Credentials) -> Result<AuthSuccess, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let (status, body) = post_json(SIGN_UP_ENDPOINT, credentials).await?;
        if !(200..300).contains(&status) {
            return Err(AuthError::new(failure_message("sign up", status, &body)));
        }
        parse_sign_up_body(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = credentials;
        Err(AuthError::new(UNAVAILABLE))
    }
}

/// Look up the current session via `GET /api/auth/me`.
pub async fn fetch_session() -> SessionLookup {
    #[cfg(feature = "hydrate")]
    {
        let resp = match gloo_net::http::Request::get(SESSION_ENDPOINT).send().await {
            Ok(resp) => resp,
            Err(e) => return SessionLookup::LookupFailed(AuthError::new(format!("could not reach server: {e}"))),
        };
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        lookup_from_response(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        SessionLookup::LookupFailed(AuthError::new(UNAVAILABLE))
    }
}

/// Sign out via `POST /api/auth/logout`.
///
/// # Errors
///
/// Returns an error if the request could not be sent or the server refused it.
pub async fn logout() -> Result<(), AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOGOUT_ENDPOINT)
            .send()
            .await
            .map_err(|e| AuthError::new(format!("could not reach server: {e}")))?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::new(failure_message("sign out", status, &body)));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(AuthError::new(UNAVAILABLE))
    }
}
