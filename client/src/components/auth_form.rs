//! Email + password form shared by the login and sign-up pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives a page-local `LoginFlow`. On success the user is written into the
//! shared `AuthState` before navigating; results that come back after the
//! page unmounted are dropped because the flow signal is gone.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::provider::{HttpIdentityProvider, IdentityProvider};
use crate::state::auth::AuthState;
use crate::state::login::{AuthMode, LoginFlow, LoginOutcome, LoginPhase, attempt};

fn submit_label(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::SignIn => "Log in",
        AuthMode::SignUp => "Create account",
    }
}

fn busy_label(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::SignIn => "Signing in...",
        AuthMode::SignUp => "Creating account...",
    }
}

fn confirmation_notice(email: &str) -> String {
    format!("Check {email} for a confirmation link, then log in.")
}

/// Run one submission of `flow` against `provider`.
///
/// On success the signed-in user is stored in `auth` before the outcome is
/// returned, so the caller can navigate straight away. Returns `None` when
/// the submit was refused or either signal was disposed while the provider
/// call was in flight.
pub async fn run_submit<P>(provider: &P, flow: RwSignal<LoginFlow>, auth: RwSignal<AuthState>) -> Option<LoginOutcome>
where
    P: IdentityProvider + ?Sized,
{
    let ticket = flow.try_update(LoginFlow::begin_submit)?.ok()?;
    let result = attempt(provider, &ticket).await;

    let mut next_auth = auth.try_get_untracked()?;
    let outcome = flow.try_update(|f| f.complete(ticket, result, &mut next_auth))?;
    match &outcome {
        LoginOutcome::Navigate(_) => auth.try_update(|state| *state = next_auth)?,
        LoginOutcome::ShowError(message) => leptos::logging::log!("auth attempt rejected: {message}"),
        LoginOutcome::AwaitConfirmation(_) | LoginOutcome::Stale => {}
    }
    Some(outcome)
}

#[component]
pub fn AuthForm(mode: AuthMode) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let provider = expect_context::<HttpIdentityProvider>();
    let navigate = use_navigate();
    let flow = RwSignal::new(LoginFlow::new(mode));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if flow.with_untracked(LoginFlow::is_submitting) {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use leptos_router::NavigateOptions;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if let Some(LoginOutcome::Navigate(route)) = run_submit(&provider, flow, auth).await {
                    navigate(route.path(), NavigateOptions::default());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (provider, auth, &navigate);
        }
    };

    let submitting = move || flow.with(LoginFlow::is_submitting);
    let password_autocomplete = match mode {
        AuthMode::SignIn => "current-password",
        AuthMode::SignUp => "new-password",
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <label class="auth-form__label">
                "Email"
                <input
                    class="auth-form__input"
                    type="email"
                    required=true
                    autocomplete="email"
                    placeholder="you@example.com"
                    prop:value=move || flow.with(|f| f.form.email.clone())
                    on:input=move |ev| flow.update(|f| f.form.email = event_target_value(&ev))
                />
            </label>
            <label class="auth-form__label">
                "Password"
                <input
                    class="auth-form__input"
                    type="password"
                    required=true
                    autocomplete=password_autocomplete
                    prop:value=move || flow.with(|f| f.form.password.clone())
                    on:input=move |ev| flow.update(|f| f.form.password = event_target_value(&ev))
                />
            </label>
            <button class="auth-form__submit btn btn--primary" type="submit" disabled=submitting>
                {move || if submitting() { busy_label(mode) } else { submit_label(mode) }}
            </button>
            {move || {
                flow.with(|f| f.error_message().map(str::to_owned))
                    .map(|message| view! { <p class="auth-form__error" role="alert">{message}</p> })
            }}
            {move || {
                flow.with(|f| match &f.phase {
                        LoginPhase::AwaitingConfirmation { email } => Some(confirmation_notice(email)),
                        _ => None,
                    })
                    .map(|notice| view! { <p class="auth-form__notice">{notice}</p> })
            }}
        </form>
    }
}
