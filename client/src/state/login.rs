//! Login / sign-up form state machine.
//!
//! DESIGN
//! ======
//! `Idle -> Submitting -> Succeeded | Failed`. `Failed` behaves like `Idle`
//! (fields editable, submit allowed) but keeps the provider's message on
//! screen. Each submit hands out a `SubmitTicket`; `complete` only accepts
//! the ticket of the attempt currently in flight, so a late answer for an
//! abandoned attempt cannot touch the form or the auth state.
//!
//! A second submit while one is in flight is rejected rather than raced.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::provider::{AuthSuccess, IdentityProvider};
use crate::net::types::{AuthError, Credentials};
use crate::routes::AppRoute;
use crate::state::auth::AuthState;

pub const INCOMPLETE_FORM_MESSAGE: &str = "Enter both email and password.";
const MISSING_USER_ID_MESSAGE: &str = "Sign-in returned an account without an id.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting {
        attempt: u64,
    },
    Succeeded,
    Failed {
        message: String,
    },
    /// Sign-up accepted; the provider wants the address confirmed first.
    AwaitingConfirmation {
        email: String,
    },
}

/// Why `begin_submit` refused to start an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitRejected {
    InFlight,
    AlreadySignedIn,
    Incomplete,
}

/// What the page should do once an attempt finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Navigate(AppRoute),
    ShowError(String),
    AwaitConfirmation(String),
    /// The result belonged to an attempt that is no longer current.
    Stale,
}

/// Snapshot of one submission. Consumed by `LoginFlow::complete`.
#[derive(Debug)]
pub struct SubmitTicket {
    attempt: u64,
    mode: AuthMode,
    credentials: Credentials,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginFlow {
    pub mode: AuthMode,
    pub form: LoginForm,
    pub phase: LoginPhase,
    attempts: u64,
}

impl LoginFlow {
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self { mode, form: LoginForm::default(), phase: LoginPhase::Idle, attempts: 0 }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, LoginPhase::Submitting { .. })
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            LoginPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Start an attempt from the current form contents.
    ///
    /// # Errors
    ///
    /// Refuses while another attempt is in flight, after success, or when a
    /// field is empty (the last also moves the flow to `Failed`).
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitRejected> {
        match self.phase {
            LoginPhase::Submitting { .. } => return Err(SubmitRejected::InFlight),
            LoginPhase::Succeeded => return Err(SubmitRejected::AlreadySignedIn),
            _ => {}
        }

        let email = self.form.email.trim();
        if email.is_empty() || self.form.password.is_empty() {
            self.phase = LoginPhase::Failed { message: INCOMPLETE_FORM_MESSAGE.to_owned() };
            return Err(SubmitRejected::Incomplete);
        }

        self.attempts += 1;
        self.phase = LoginPhase::Submitting { attempt: self.attempts };
        Ok(SubmitTicket {
            attempt: self.attempts,
            mode: self.mode,
            credentials: Credentials { email: email.to_owned(), password: self.form.password.clone() },
        })
    }

    /// Apply the provider's answer for `ticket`.
    ///
    /// On success the user is written into `auth` before `Navigate` is
    /// returned. On failure `auth` and the form fields are left untouched.
    pub fn complete(
        &mut self,
        ticket: SubmitTicket,
        result: Result<AuthSuccess, AuthError>,
        auth: &mut AuthState,
    ) -> LoginOutcome {
        if self.phase != (LoginPhase::Submitting { attempt: ticket.attempt }) {
            return LoginOutcome::Stale;
        }

        match result {
            Ok(AuthSuccess::SignedIn(user)) => {
                if !auth.establish(user) {
                    return self.fail(MISSING_USER_ID_MESSAGE.to_owned());
                }
                self.phase = LoginPhase::Succeeded;
                self.form.password.clear();
                LoginOutcome::Navigate(AppRoute::AFTER_LOGIN)
            }
            Ok(AuthSuccess::ConfirmationPending { email }) => {
                self.phase = LoginPhase::AwaitingConfirmation { email: email.clone() };
                self.form.password.clear();
                LoginOutcome::AwaitConfirmation(email)
            }
            Err(e) => self.fail(e.0),
        }
    }

    fn fail(&mut self, message: String) -> LoginOutcome {
        self.phase = LoginPhase::Failed { message: message.clone() };
        LoginOutcome::ShowError(message)
    }
}

/// Run the provider call for `ticket`.
///
/// # Errors
///
/// Passes through the provider's error unchanged.
pub async fn attempt<P>(provider: &P, ticket: &SubmitTicket) -> Result<AuthSuccess, AuthError>
where
    P: IdentityProvider + ?Sized,
{
    match ticket.mode {
        AuthMode::SignIn => provider
            .sign_in(&ticket.credentials)
            .await
            .map(AuthSuccess::SignedIn),
        AuthMode::SignUp => provider.sign_up(&ticket.credentials).await,
    }
}
