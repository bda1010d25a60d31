//! Guard wrapper for routes that need a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the gate asks the identity provider for the current session
//! (unless the answer is already known), then renders its children, a
//! redirect to `/login`, or the lookup error with a retry button.

#[cfg(test)]
#[path = "session_gate_test.rs"]
mod session_gate_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::provider::{HttpIdentityProvider, IdentityProvider, SessionLookup};
use crate::state::auth::AuthState;
use crate::util::auth::{GateDecision, gate_decision};

/// Ask `provider` for the current session and store the answer in `auth`.
///
/// Does nothing unless the state calls for a lookup. Returns whether a
/// result was stored; `false` also covers an `auth` signal disposed while
/// the lookup was in flight.
pub async fn check_session<P>(provider: &P, auth: RwSignal<AuthState>) -> bool
where
    P: IdentityProvider + ?Sized,
{
    let started = auth.try_update(|state| {
        if !state.needs_lookup() {
            return false;
        }
        state.begin_lookup();
        true
    });
    if started != Some(true) {
        return false;
    }

    let lookup = provider.current_session().await;
    if let SessionLookup::LookupFailed(e) = &lookup {
        leptos::logging::warn!("session lookup failed: {e}");
    }
    auth.try_update(|state| state.finish_lookup(lookup))
        .unwrap_or(false)
}

fn start_lookup(auth: RwSignal<AuthState>, provider: HttpIdentityProvider) {
    if !auth.with_untracked(AuthState::needs_lookup) {
        return;
    }

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        check_session(&provider, auth).await;
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = provider;
    }
}

/// Renders `children` only for an authenticated session.
#[component]
pub fn SessionGate(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let provider = expect_context::<HttpIdentityProvider>();
    let navigate = use_navigate();

    start_lookup(auth, provider);

    Effect::new(move || {
        if let GateDecision::Redirect(route) = auth.with(gate_decision) {
            navigate(route.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        {move || match auth.with(gate_decision) {
            GateDecision::Render => children(),
            GateDecision::Pending => {
                view! { <p class="session-gate__status">"Checking session..."</p> }.into_any()
            }
            GateDecision::Failed(message) => {
                view! {
                    <div class="session-gate__error" role="alert">
                        <p>"Could not check your session: " {message}</p>
                        <button class="btn" on:click=move |_| start_lookup(auth, provider)>
                            "Try again"
                        </button>
                    </div>
                }
                    .into_any()
            }
            GateDecision::Redirect(_) => ().into_any(),
        }}
    }
}
