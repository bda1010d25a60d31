//! Top navigation bar.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::sign_out::SignOutButton;
use crate::routes::AppRoute;
use crate::state::auth::AuthState;

fn link_class(route: AppRoute, current: Option<AppRoute>) -> &'static str {
    if current == Some(route) { "nav-bar__link nav-bar__link--active" } else { "nav-bar__link" }
}

/// Site links plus either the signed-in email with a sign-out button or
/// log-in / sign-up links.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let current = move || location.pathname.with(|path| AppRoute::from_path(path));
    let signed_in = move || auth.with(AuthState::is_authenticated);
    let email = move || auth.with(|state| state.user().map(|user| user.email.clone()).unwrap_or_default());

    view! {
        <nav class="nav-bar">
            <a href=AppRoute::Landing.path() class="nav-bar__brand">"Journey"</a>
            <a href=AppRoute::SimulationLab.path() class=move || link_class(AppRoute::SimulationLab, current())>
                "Simulation Lab"
            </a>
            <a href=AppRoute::Dashboard.path() class=move || link_class(AppRoute::Dashboard, current())>
                "Dashboard"
            </a>
            <span class="nav-bar__spacer"></span>
            <Show
                when=signed_in
                fallback=move || {
                    view! {
                        <a href=AppRoute::Login.path() class=move || link_class(AppRoute::Login, current())>
                            "Log in"
                        </a>
                        <a href=AppRoute::Signup.path() class="nav-bar__link nav-bar__link--cta">"Sign up"</a>
                    }
                }
            >
                <span class="nav-bar__user">{email}</span>
                <SignOutButton/>
            </Show>
        </nav>
    }
}
