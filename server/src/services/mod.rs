//! Identity services used by the HTTP auth routes.
//!
//! ARCHITECTURE
//! ============
//! `identity` defines the provider contract the routes depend on;
//! `hosted` implements it against the hosted provider's REST API.

pub mod hosted;
pub mod identity;
