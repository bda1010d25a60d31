//! Dashboard page for signed-in users.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authenticated landing route after sign-in. `App` puts it behind
//! `SessionGate` because `AppRoute::Dashboard` requires a session.
//! Metric cards are fed by fixed sample data.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::sign_out::SignOutButton;
use crate::state::auth::AuthState;

struct Metric {
    label: &'static str,
    value: u32,
    /// Week-over-week change in percent.
    delta: i32,
}

const SAMPLE_METRICS: [Metric; 4] = [
    Metric { label: "Milestones reached", value: 12, delta: 20 },
    Metric { label: "Active simulations", value: 3, delta: 0 },
    Metric { label: "Hours logged", value: 41, delta: -8 },
    Metric { label: "Streak (days)", value: 9, delta: 50 },
];

fn format_delta(delta: i32) -> String {
    match delta {
        0 => "no change".to_owned(),
        d if d > 0 => format!("+{d}%"),
        d => format!("{d}%"),
    }
}

fn greeting(email: Option<&str>) -> String {
    match email.and_then(|e| e.split('@').next()).filter(|name| !name.is_empty()) {
        Some(name) => format!("Welcome back, {name}"),
        None => "Welcome back".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{move || auth.with(|state| greeting(state.user().map(|user| user.email.as_str())))}</h1>
                <SignOutButton/>
            </header>
            <div class="dashboard-page__metrics">
                {SAMPLE_METRICS
                    .iter()
                    .map(|metric| {
                        let down = metric.delta < 0;
                        view! {
                            <div class="metric-card">
                                <span class="metric-card__label">{metric.label}</span>
                                <span class="metric-card__value">{metric.value}</span>
                                <span
                                    class="metric-card__delta"
                                    class:metric-card__delta--down=down
                                >
                                    {format_delta(metric.delta)}
                                </span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}
