//! Identity-provider contract used by the login flow and session gate.
//!
//! DESIGN
//! ======
//! The flow and the gate only see this trait, so tests script provider
//! behavior directly. Futures are `?Send` because browser fetches are tied
//! to the single WASM thread.

use async_trait::async_trait;

use super::api;
use super::types::{AuthError, Credentials, User};

/// Result of asking the provider who is signed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionLookup {
    Authenticated(User),
    Unauthenticated,
    /// The lookup itself failed; says nothing about whether a session exists.
    LookupFailed(AuthError),
}

/// What a successful sign-in or sign-up yields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthSuccess {
    /// The provider issued a session straight away.
    SignedIn(User),
    /// The account exists but the email must be confirmed before signing in.
    ConfirmationPending { email: String },
}

#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns the provider's message when the credentials are rejected.
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError>;

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns the provider's message when registration is refused.
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSuccess, AuthError>;

    /// Look up the session the provider currently holds for this browser.
    async fn current_session(&self) -> SessionLookup;

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider could not be told about the sign-out.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Browser implementation backed by the same-origin `/api/auth/*` endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpIdentityProvider;

#[async_trait(?Send)]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        api::sign_in(credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSuccess, AuthError> {
        api::sign_up(credentials).await
    }

    async fn current_session(&self) -> SessionLookup {
        api::fetch_session().await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        api::logout().await
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
