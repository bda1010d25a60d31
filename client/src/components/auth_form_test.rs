use async_trait::async_trait;
use futures::executor::block_on;
use leptos::reactive::owner::Owner;

use super::*;
use crate::net::provider::test_helpers::{FakeProvider, INVALID_CREDENTIALS};
use crate::net::provider::{AuthSuccess, SessionLookup};
use crate::net::types::{AuthError, Credentials, User};
use crate::routes::AppRoute;
use crate::state::login::SubmitRejected;

#[test]
fn submit_label_matches_mode() {
    assert_eq!(submit_label(AuthMode::SignIn), "Log in");
    assert_eq!(submit_label(AuthMode::SignUp), "Create account");
}

#[test]
fn busy_label_matches_mode() {
    assert_eq!(busy_label(AuthMode::SignIn), "Signing in...");
    assert_eq!(busy_label(AuthMode::SignUp), "Creating account...");
}

#[test]
fn confirmation_notice_names_address() {
    assert_eq!(
        confirmation_notice("new@example.com"),
        "Check new@example.com for a confirmation link, then log in."
    );
}

// =============================================================
// run_submit
// =============================================================

fn filled_flow(mode: AuthMode, email: &str, password: &str) -> RwSignal<LoginFlow> {
    let mut flow = LoginFlow::new(mode);
    flow.form.email = email.to_owned();
    flow.form.password = password.to_owned();
    RwSignal::new(flow)
}

/// Provider that drops the form's signal mid-request, as when the user
/// navigates away before the answer arrives.
struct LeavingProvider {
    inner: FakeProvider,
    flow: RwSignal<LoginFlow>,
}

#[async_trait(?Send)]
impl IdentityProvider for LeavingProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        self.flow.dispose();
        self.inner.sign_in(credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSuccess, AuthError> {
        self.inner.sign_up(credentials).await
    }

    async fn current_session(&self) -> SessionLookup {
        self.inner.current_session().await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.inner.sign_out().await
    }
}

#[test]
fn correct_credentials_store_user_then_navigate() {
    Owner::new().with(|| {
        let provider = FakeProvider::with_demo_account();
        let auth = RwSignal::new(AuthState::default());
        let flow = filled_flow(AuthMode::SignIn, "user@example.com", "correct");

        let outcome = block_on(run_submit(&provider, flow, auth));

        assert_eq!(outcome, Some(LoginOutcome::Navigate(AppRoute::Dashboard)));
        assert_eq!(
            auth.with_untracked(|state| state.user().cloned()),
            Some(User { id: "u1".to_owned(), email: "user@example.com".to_owned() })
        );
        assert_eq!(flow.with_untracked(|f| f.phase.clone()), LoginPhase::Succeeded);
    });
}

#[test]
fn rejected_credentials_leave_auth_untouched() {
    Owner::new().with(|| {
        let provider = FakeProvider::with_demo_account();
        let auth = RwSignal::new(AuthState::default());
        let flow = filled_flow(AuthMode::SignIn, "user@example.com", "wrong");

        let outcome = block_on(run_submit(&provider, flow, auth));

        assert_eq!(outcome, Some(LoginOutcome::ShowError(INVALID_CREDENTIALS.to_owned())));
        assert_eq!(auth.get_untracked(), AuthState::default());
        assert_eq!(
            flow.with_untracked(|f| f.error_message().map(str::to_owned)),
            Some(INVALID_CREDENTIALS.to_owned())
        );
        assert_eq!(flow.with_untracked(|f| f.form.password.clone()), "wrong");
    });
}

#[test]
fn submit_while_in_flight_never_reaches_provider() {
    Owner::new().with(|| {
        let provider = FakeProvider::with_demo_account();
        let auth = RwSignal::new(AuthState::default());
        let flow = filled_flow(AuthMode::SignIn, "user@example.com", "correct");
        let pending = flow.try_update(LoginFlow::begin_submit).map(|r| r.is_ok());
        assert_eq!(pending, Some(true));

        assert_eq!(block_on(run_submit(&provider, flow, auth)), None);

        assert_eq!(provider.sign_in_calls.get(), 0);
        assert_eq!(flow.try_update(LoginFlow::begin_submit).map(|r| r.err()), Some(Some(SubmitRejected::InFlight)));
    });
}

#[test]
fn pending_confirmation_does_not_sign_in() {
    Owner::new().with(|| {
        let mut provider = FakeProvider::new();
        provider.confirm_sign_ups = true;
        let auth = RwSignal::new(AuthState::default());
        let flow = filled_flow(AuthMode::SignUp, "new@example.com", "pw123456");

        let outcome = block_on(run_submit(&provider, flow, auth));

        assert_eq!(outcome, Some(LoginOutcome::AwaitConfirmation("new@example.com".to_owned())));
        assert!(auth.with_untracked(|state| state.user().is_none()));
    });
}

#[test]
fn answer_after_form_unmounts_is_dropped() {
    Owner::new().with(|| {
        let auth = RwSignal::new(AuthState::default());
        let flow = filled_flow(AuthMode::SignIn, "user@example.com", "correct");
        let provider = LeavingProvider { inner: FakeProvider::with_demo_account(), flow };

        assert_eq!(block_on(run_submit(&provider, flow, auth)), None);

        assert_eq!(provider.inner.sign_in_calls.get(), 1);
        assert_eq!(auth.get_untracked(), AuthState::default());
    });
}

#[test]
fn disposed_auth_state_blocks_the_write() {
    Owner::new().with(|| {
        let provider = FakeProvider::with_demo_account();
        let auth = RwSignal::new(AuthState::default());
        let flow = filled_flow(AuthMode::SignIn, "user@example.com", "correct");
        auth.dispose();

        assert_eq!(block_on(run_submit(&provider, flow, auth)), None);
    });
}
