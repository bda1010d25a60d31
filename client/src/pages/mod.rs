//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Session gating is applied by `App` from the route table.

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod signup;
pub mod simulation_lab;
