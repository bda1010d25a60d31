use futures::executor::block_on;
use leptos::reactive::owner::Owner;

use super::*;
use crate::net::provider::SessionLookup;
use crate::net::provider::test_helpers::FakeProvider;
use crate::net::types::User;
use crate::state::auth::SessionStatus;

fn signed_in() -> AuthState {
    let mut state = AuthState::default();
    assert!(state.establish(User { id: "u1".to_owned(), email: "user@example.com".to_owned() }));
    state
}

#[test]
fn sign_out_clears_session_everywhere() {
    Owner::new().with(|| {
        let provider = FakeProvider::with_demo_account();
        *provider.session.borrow_mut() = SessionLookup::Authenticated(User {
            id: "u1".to_owned(),
            email: "user@example.com".to_owned(),
        });
        let auth = RwSignal::new(signed_in());

        assert!(block_on(sign_out(&provider, auth)));

        assert_eq!(provider.sign_out_calls.get(), 1);
        assert_eq!(*provider.session.borrow(), SessionLookup::Unauthenticated);
        assert_eq!(auth.with_untracked(|state| state.status.clone()), SessionStatus::Unauthenticated);
        assert!(!auth.with_untracked(AuthState::is_authenticated));
    });
}

#[test]
fn sign_out_after_unmount_reports_nothing_stored() {
    Owner::new().with(|| {
        let provider = FakeProvider::with_demo_account();
        let auth = RwSignal::new(signed_in());
        auth.dispose();

        assert!(!block_on(sign_out(&provider, auth)));
        assert_eq!(provider.sign_out_calls.get(), 1);
    });
}
