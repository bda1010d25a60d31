//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::components::session_gate::SessionGate;
use crate::net::provider::HttpIdentityProvider;
use crate::pages::{
    dashboard::DashboardPage, landing::LandingPage, login::LoginPage, signup::SignupPage,
    simulation_lab::SimulationLabPage,
};
use crate::routes::AppRoute;
use crate::state::auth::AuthState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

fn page_content(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage/> }.into_any(),
        AppRoute::Login => view! { <LoginPage/> }.into_any(),
        AppRoute::Signup => view! { <SignupPage/> }.into_any(),
        AppRoute::SimulationLab => view! { <SimulationLabPage/> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage/> }.into_any(),
    }
}

/// View for `route`, behind `SessionGate` when the route requires a session.
fn page(route: AppRoute) -> AnyView {
    if route.requires_session() {
        view! { <SessionGate>{page_content(route)}</SessionGate> }.into_any()
    } else {
        page_content(route)
    }
}

/// Root application component.
///
/// Creates the empty current-user slot and the identity provider client,
/// provides both as context, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(RwSignal::new(AuthState::default()));
    provide_context(HttpIdentityProvider);

    view! {
        <Title text="Journey"/>

        <Router>
            <NavBar/>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment(AppRoute::Landing.segment()) view=|| page(AppRoute::Landing)/>
                    <Route path=StaticSegment(AppRoute::Login.segment()) view=|| page(AppRoute::Login)/>
                    <Route path=StaticSegment(AppRoute::Signup.segment()) view=|| page(AppRoute::Signup)/>
                    <Route path=StaticSegment(AppRoute::SimulationLab.segment()) view=|| page(AppRoute::SimulationLab)/>
                    <Route path=StaticSegment(AppRoute::Dashboard.segment()) view=|| page(AppRoute::Dashboard)/>
                </Routes>
            </main>
        </Router>
    }
}
