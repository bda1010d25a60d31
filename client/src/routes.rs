//! Route table.
//!
//! DESIGN
//! ======
//! Paths live here once so the router, redirects, and links cannot drift
//! apart. `App` puts every route whose `requires_session` is true behind
//! `SessionGate`; pages themselves never check the session.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Every view the app can navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    /// `/`: public landing page.
    Landing,
    /// `/login`: email + password sign-in.
    Login,
    /// `/signup`: account creation.
    Signup,
    /// `/simulation-lab`: gated workspace.
    SimulationLab,
    /// `/dashboard`: gated home for signed-in users.
    Dashboard,
}

impl AppRoute {
    pub const ALL: [Self; 5] = [Self::Landing, Self::Login, Self::Signup, Self::SimulationLab, Self::Dashboard];

    /// Where a successful sign-in or sign-up lands.
    pub const AFTER_LOGIN: Self = Self::Dashboard;

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::SimulationLab => "/simulation-lab",
            Self::Dashboard => "/dashboard",
        }
    }

    /// Path segment used by the Leptos router (`path()` without the leading `/`).
    #[must_use]
    pub fn segment(self) -> &'static str {
        self.path().trim_start_matches('/')
    }

    /// Resolve a URL path to a route. A single trailing `/` is tolerated on
    /// non-root paths.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let normalized = if path.len() > 1 { path.strip_suffix('/').unwrap_or(path) } else { path };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    #[must_use]
    pub const fn requires_session(self) -> bool {
        matches!(self, Self::SimulationLab | Self::Dashboard)
    }
}
