//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure decision logic kept out of components so it can be unit tested
//! without a browser.

pub mod auth;
