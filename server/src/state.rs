//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the identity provider behind a trait object so tests can run
//! every handler against an in-memory provider.

use std::sync::Arc;

use crate::services::identity::IdentityProvider;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, cookie_secure: bool) -> Self {
        Self { identity, cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::services::identity::test_helpers::MockIdentity;

    /// Create a test `AppState` backed by `mock`, with insecure cookies.
    #[must_use]
    pub fn test_app_state(mock: Arc<MockIdentity>) -> AppState {
        AppState::new(mock, false)
    }
}
