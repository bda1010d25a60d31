//! Sign-up page: account creation through the identity provider.

use leptos::prelude::*;

use crate::components::auth_form::AuthForm;
use crate::routes::AppRoute;
use crate::state::login::AuthMode;

#[component]
pub fn SignupPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create your account"</h1>
                <p class="login-card__subtitle">"Start mapping your journey in minutes."</p>
                <AuthForm mode=AuthMode::SignUp/>
                <p class="login-card__switch">
                    "Already registered? "
                    <a href=AppRoute::Login.path()>"Log in"</a>
                </p>
            </div>
        </div>
    }
}
