//! Sign-out control shared by the nav bar and the dashboard.

#[cfg(test)]
#[path = "sign_out_test.rs"]
mod sign_out_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::provider::{HttpIdentityProvider, IdentityProvider};
use crate::state::auth::AuthState;

/// End the provider session and clear `auth`.
///
/// The local session is cleared even when the provider call fails. Returns
/// `false` when `auth` was disposed before the call finished.
pub async fn sign_out<P>(provider: &P, auth: RwSignal<AuthState>) -> bool
where
    P: IdentityProvider + ?Sized,
{
    if let Err(e) = provider.sign_out().await {
        leptos::logging::warn!("sign-out request failed: {e}");
    }
    auth.try_update(AuthState::clear).is_some()
}

#[component]
pub fn SignOutButton() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let provider = expect_context::<HttpIdentityProvider>();
    let navigate = use_navigate();
    let signing_out = RwSignal::new(false);

    let on_click = move |_: leptos::ev::MouseEvent| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);

        #[cfg(feature = "hydrate")]
        {
            use leptos_router::NavigateOptions;

            use crate::routes::AppRoute;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if sign_out(&provider, auth).await {
                    navigate(AppRoute::Login.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                let _ = signing_out.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (provider, auth, &navigate);
        }
    };

    view! {
        <button class="btn sign-out-button" on:click=on_click disabled=move || signing_out.get()>
            "Sign out"
        </button>
    }
}
