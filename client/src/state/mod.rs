//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the app-wide current-user slot provided through context;
//! `login` is the per-page form state machine that writes to it.

pub mod auth;
pub mod login;
