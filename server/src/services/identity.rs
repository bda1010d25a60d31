//! Identity-provider contract.
//!
//! DESIGN
//! ======
//! Route handlers talk to the hosted provider only through
//! [`IdentityProvider`], so tests swap in an in-memory implementation.
//! Tokens stay on the server side of this trait; the browser only ever
//! sees them as HttpOnly cookies.

use serde::{Deserialize, Serialize};

// =============================================================================
// TYPES
// =============================================================================

/// A provider account as far as this app cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    pub email: String,
}

/// Tokens issued by a successful sign-in, sign-up, or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds, when the provider reports one.
    pub expires_in: Option<u64>,
    pub user: ProviderUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpResult {
    Session(ProviderSession),
    /// Account created; the provider wants the email confirmed first.
    ConfirmationPending(ProviderUser),
}

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider understood the request and refused it.
    #[error("identity provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The provider could not be reached or failed on its side.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with a body we could not decode.
    #[error("identity provider response malformed: {0}")]
    Malformed(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl IdentityError {
    /// Text safe to show the end user. Provider rejections pass through
    /// verbatim; infrastructure failures get a generic sentence.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Unavailable(_) => "The sign-in service is unavailable. Try again shortly.".to_owned(),
            Self::Malformed(_) | Self::HttpClientBuild(_) => {
                "The sign-in service returned an unexpected response.".to_owned()
            }
        }
    }
}

// =============================================================================
// PROVIDER TRAIT
// =============================================================================

/// Hosted identity provider operations. Enables mocking in tests.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange email + password for a session.
    ///
    /// # Errors
    ///
    /// `Rejected` for bad credentials, `Unavailable`/`Malformed` otherwise.
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError>;

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// `Rejected` when the provider refuses the registration.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResult, IdentityError>;

    /// Resolve an access token. `Ok(None)` means the token is expired or revoked.
    ///
    /// # Errors
    ///
    /// Returns an error only when the lookup itself could not be performed.
    async fn get_user(&self, access_token: &str) -> Result<Option<ProviderUser>, IdentityError>;

    /// Trade a refresh token for a new session. `Ok(None)` means the refresh
    /// token is no longer accepted.
    ///
    /// # Errors
    ///
    /// Returns an error only when the refresh could not be performed.
    async fn refresh(&self, refresh_token: &str) -> Result<Option<ProviderSession>, IdentityError>;

    /// Revoke the session behind `access_token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider could not be told.
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";
    pub const ALREADY_REGISTERED: &str = "User already registered";

    /// In-memory provider: an account table plus live access/refresh tokens.
    #[derive(Default)]
    pub struct MockIdentity {
        accounts: Mutex<HashMap<String, (String, ProviderUser)>>,
        access_tokens: Mutex<HashMap<String, ProviderUser>>,
        refresh_tokens: Mutex<HashMap<String, ProviderUser>>,
        issued: AtomicUsize,
        pub unavailable: AtomicBool,
        pub confirm_sign_ups: AtomicBool,
        pub sign_in_calls: AtomicUsize,
        pub sign_out_calls: AtomicUsize,
    }

    impl MockIdentity {
        /// Provider holding `user@example.com` / `correct` as user `u1`.
        pub fn with_demo_account() -> Self {
            let mock = Self::default();
            mock.add_account("u1", "user@example.com", "correct");
            mock
        }

        pub fn add_account(&self, id: &str, email: &str, password: &str) {
            let user = ProviderUser { id: id.to_owned(), email: email.to_owned() };
            self.accounts
                .lock()
                .expect("accounts mutex should lock")
                .insert(email.to_owned(), (password.to_owned(), user));
        }

        /// Forget an access token, as if it had expired.
        pub fn expire_access(&self, access_token: &str) {
            self.access_tokens
                .lock()
                .expect("tokens mutex should lock")
                .remove(access_token);
        }

        pub fn set_unavailable(&self, value: bool) {
            self.unavailable.store(value, Ordering::SeqCst);
        }

        fn check_available(&self) -> Result<(), IdentityError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(IdentityError::Unavailable("connection refused".into()));
            }
            Ok(())
        }

        fn issue(&self, user: &ProviderUser) -> ProviderSession {
            let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            let session = ProviderSession {
                access_token: format!("at-{}-{n}", user.id),
                refresh_token: format!("rt-{}-{n}", user.id),
                expires_in: Some(3600),
                user: user.clone(),
            };
            self.access_tokens
                .lock()
                .expect("tokens mutex should lock")
                .insert(session.access_token.clone(), user.clone());
            self.refresh_tokens
                .lock()
                .expect("tokens mutex should lock")
                .insert(session.refresh_token.clone(), user.clone());
            session
        }
    }

    #[async_trait::async_trait]
    impl IdentityProvider for MockIdentity {
        async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            self.check_available()?;
            let user = {
                let accounts = self.accounts.lock().expect("accounts mutex should lock");
                match accounts.get(email) {
                    Some((stored, user)) if stored == password => user.clone(),
                    _ => {
                        return Err(IdentityError::Rejected { status: 400, message: INVALID_CREDENTIALS.into() });
                    }
                }
            };
            Ok(self.issue(&user))
        }

        async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResult, IdentityError> {
            self.check_available()?;
            let id = {
                let accounts = self.accounts.lock().expect("accounts mutex should lock");
                if accounts.contains_key(email) {
                    return Err(IdentityError::Rejected { status: 422, message: ALREADY_REGISTERED.into() });
                }
                format!("u{}", accounts.len() + 1)
            };
            self.add_account(&id, email, password);
            let user = ProviderUser { id, email: email.to_owned() };
            if self.confirm_sign_ups.load(Ordering::SeqCst) {
                return Ok(SignUpResult::ConfirmationPending(user));
            }
            Ok(SignUpResult::Session(self.issue(&user)))
        }

        async fn get_user(&self, access_token: &str) -> Result<Option<ProviderUser>, IdentityError> {
            self.check_available()?;
            let tokens = self.access_tokens.lock().expect("tokens mutex should lock");
            Ok(tokens.get(access_token).cloned())
        }

        async fn refresh(&self, refresh_token: &str) -> Result<Option<ProviderSession>, IdentityError> {
            self.check_available()?;
            let user = self
                .refresh_tokens
                .lock()
                .expect("tokens mutex should lock")
                .remove(refresh_token);
            Ok(user.map(|user| self.issue(&user)))
        }

        async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            self.check_available()?;
            self.expire_access(access_token);
            Ok(())
        }
    }
}
