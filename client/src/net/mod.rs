//! Networking modules for the auth API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `provider` defines the identity-provider
//! contract the login flow and session gate depend on, and `types` defines
//! the shared wire schema.

pub mod api;
pub mod provider;
pub mod types;
