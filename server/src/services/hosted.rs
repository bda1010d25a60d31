//! Hosted identity provider client (GoTrue-compatible REST API).
//!
//! Thin HTTP wrapper over `/auth/v1/*`. Pure parsing in `parse_*` and
//! `provider_error_message` for testability.

use std::time::Duration;

use serde::Deserialize;

use super::identity::{IdentityError, IdentityProvider, ProviderSession, ProviderUser, SignUpResult};
use crate::config::IdentityConfig;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HostedIdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HostedIdentityClient {
    /// Build a client for the provider described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| IdentityError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), api_key: config.api_key.clone() })
    }

    fn endpoint(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), IdentityError> {
        let response = request
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        Ok((status, text))
    }

    async fn token_grant(&self, grant_type: &str, body: serde_json::Value) -> Result<(u16, String), IdentityError> {
        let url = self.endpoint(&format!("token?grant_type={grant_type}"));
        self.send(self.http.post(url).json(&body)).await
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HostedIdentityClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError> {
        let (status, text) = self
            .token_grant("password", serde_json::json!({ "email": email, "password": password }))
            .await?;
        if status != 200 {
            return Err(status_error(status, &text));
        }
        parse_session(&text)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResult, IdentityError> {
        let request = self
            .http
            .post(self.endpoint("signup"))
            .json(&serde_json::json!({ "email": email, "password": password }));
        let (status, text) = self.send(request).await?;
        if status != 200 {
            return Err(status_error(status, &text));
        }
        parse_sign_up(&text)
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<ProviderUser>, IdentityError> {
        let request = self.http.get(self.endpoint("user")).bearer_auth(access_token);
        let (status, text) = self.send(request).await?;
        user_lookup(status, &text)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Option<ProviderSession>, IdentityError> {
        let (status, text) = self
            .token_grant("refresh_token", serde_json::json!({ "refresh_token": refresh_token }))
            .await?;
        match status {
            200 => parse_session(&text).map(Some),
            400 | 401 => Ok(None),
            _ => Err(status_error(status, &text)),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let request = self.http.post(self.endpoint("logout")).bearer_auth(access_token);
        let (status, text) = self.send(request).await?;
        match status {
            200 | 204 | 401 | 403 => Ok(()),
            _ => Err(status_error(status, &text)),
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct SessionBody {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    expires_in: Option<u64>,
    user: UserBody,
}

#[derive(Deserialize)]
struct UserBody {
    id: String,
    email: Option<String>,
}

impl UserBody {
    fn into_user(self) -> Result<ProviderUser, IdentityError> {
        if self.id.trim().is_empty() {
            return Err(IdentityError::Malformed("user id missing".into()));
        }
        Ok(ProviderUser { id: self.id, email: self.email.unwrap_or_default() })
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/auth/v1/{path}", base_url.trim_end_matches('/'))
}

fn parse_session(text: &str) -> Result<ProviderSession, IdentityError> {
    let body: SessionBody = serde_json::from_str(text).map_err(|e| IdentityError::Malformed(e.to_string()))?;
    if body.access_token.is_empty() {
        return Err(IdentityError::Malformed("access token missing".into()));
    }
    Ok(ProviderSession {
        access_token: body.access_token,
        refresh_token: body.refresh_token,
        expires_in: body.expires_in,
        user: body.user.into_user()?,
    })
}

fn parse_user(text: &str) -> Result<ProviderUser, IdentityError> {
    let body: UserBody = serde_json::from_str(text).map_err(|e| IdentityError::Malformed(e.to_string()))?;
    body.into_user()
}

/// Sign-up answers with a full session when email confirmation is off, and
/// with the bare user object when it is on.
fn parse_sign_up(text: &str) -> Result<SignUpResult, IdentityError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| IdentityError::Malformed(e.to_string()))?;
    if value.get("access_token").is_some_and(|token| !token.is_null()) {
        return parse_session(text).map(SignUpResult::Session);
    }
    let user = value.get("user").filter(|user| !user.is_null()).unwrap_or(&value);
    let body: UserBody = serde_json::from_value(user.clone()).map_err(|e| IdentityError::Malformed(e.to_string()))?;
    body.into_user().map(SignUpResult::ConfirmationPending)
}

/// Pull the human-readable message out of a provider error body.
fn provider_error_message(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    ["error_description", "msg", "message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_owned)
}

/// Interpret a `GET /user` answer. Any client-side rejection other than rate
/// limiting means the token no longer names a user.
fn user_lookup(status: u16, text: &str) -> Result<Option<ProviderUser>, IdentityError> {
    match status {
        200 => parse_user(text).map(Some),
        429 => Err(status_error(status, text)),
        400..=499 => Ok(None),
        _ => Err(status_error(status, text)),
    }
}

fn status_error(status: u16, text: &str) -> IdentityError {
    if status >= 500 {
        return IdentityError::Unavailable(format!("status {status}"));
    }
    IdentityError::Rejected {
        status,
        message: provider_error_message(text).unwrap_or_else(|| format!("request failed: {status}")),
    }
}

#[cfg(test)]
#[path = "hosted_test.rs"]
mod tests;
