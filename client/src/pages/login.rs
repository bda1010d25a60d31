//! Login page: email + password sign-in.

use leptos::prelude::*;

use crate::components::auth_form::AuthForm;
use crate::routes::AppRoute;
use crate::state::login::AuthMode;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Welcome back"</h1>
                <p class="login-card__subtitle">"Log in to continue your journey."</p>
                <AuthForm mode=AuthMode::SignIn/>
                <p class="login-card__switch">
                    "No account yet? "
                    <a href=AppRoute::Signup.path()>"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
