//! Session-gate decision logic.
//!
//! SYSTEM CONTEXT
//! ==============
//! Gated routes must treat "no session" and "lookup failed" differently:
//! the first redirects to `/login`, the second stays put and offers a retry.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::routes::AppRoute;
use crate::state::auth::{AuthState, SessionStatus};

/// What a gated view should do for the current auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Lookup not finished yet; render a placeholder, do not navigate.
    Pending,
    Render,
    Redirect(AppRoute),
    /// Lookup failed; show the message, do not navigate.
    Failed(String),
}

#[must_use]
pub fn gate_decision(state: &AuthState) -> GateDecision {
    match &state.status {
        SessionStatus::Unknown | SessionStatus::Checking => GateDecision::Pending,
        SessionStatus::Authenticated(_) => GateDecision::Render,
        SessionStatus::Unauthenticated => GateDecision::Redirect(AppRoute::Login),
        SessionStatus::LookupFailed(e) => GateDecision::Failed(e.to_string()),
    }
}
