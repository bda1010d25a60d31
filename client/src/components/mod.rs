//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read and write shared auth state from Leptos context providers
//! installed by `App`.

pub mod auth_form;
pub mod nav_bar;
pub mod session_gate;
pub mod sign_out;
