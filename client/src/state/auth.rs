//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` creates one `RwSignal<AuthState>` at startup and provides it through
//! context. The login/sign-up flows and sign-out are the only writers; the
//! session gate and user-aware components only read it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::provider::SessionLookup;
use crate::net::types::{AuthError, User};

/// Where the app stands on "who is signed in".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing asked yet.
    #[default]
    Unknown,
    /// A lookup is in flight.
    Checking,
    Authenticated(User),
    Unauthenticated,
    LookupFailed(AuthError),
}

/// Authentication state tracking the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub status: SessionStatus,
}

impl AuthState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match &self.status {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Whether a gate mounting now should ask the provider.
    #[must_use]
    pub fn needs_lookup(&self) -> bool {
        matches!(self.status, SessionStatus::Unknown | SessionStatus::LookupFailed(_))
    }

    pub fn begin_lookup(&mut self) {
        self.status = SessionStatus::Checking;
    }

    /// Store a lookup result. Ignored unless a lookup is still pending, so a
    /// sign-in that completed meanwhile is not overwritten by an older answer.
    pub fn finish_lookup(&mut self, lookup: SessionLookup) -> bool {
        if self.status != SessionStatus::Checking {
            return false;
        }
        self.status = match lookup {
            SessionLookup::Authenticated(user) if user.is_valid() => SessionStatus::Authenticated(user),
            SessionLookup::Authenticated(_) => {
                SessionStatus::LookupFailed(AuthError::new("session is missing a user id"))
            }
            SessionLookup::Unauthenticated => SessionStatus::Unauthenticated,
            SessionLookup::LookupFailed(e) => SessionStatus::LookupFailed(e),
        };
        true
    }

    /// Record a freshly signed-in user. Refuses a user without an identifier.
    #[must_use]
    pub fn establish(&mut self, user: User) -> bool {
        if !user.is_valid() {
            return false;
        }
        self.status = SessionStatus::Authenticated(user);
        true
    }

    pub fn clear(&mut self) {
        self.status = SessionStatus::Unauthenticated;
    }
}
