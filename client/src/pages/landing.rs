//! Public landing page.

use leptos::prelude::*;

use crate::routes::AppRoute;

struct Stage {
    title: &'static str,
    blurb: &'static str,
}

const STAGES: [Stage; 3] = [
    Stage { title: "Discover", blurb: "Pick a goal and see the routes other learners took." },
    Stage { title: "Simulate", blurb: "Try scenarios in the lab before committing to a plan." },
    Stage { title: "Track", blurb: "Follow progress on your dashboard week by week." },
];

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <section class="landing-hero">
                <h1>"Plan the journey, not just the destination"</h1>
                <p>"Journey turns big goals into a path you can actually walk."</p>
                <div class="landing-hero__actions">
                    <a class="btn btn--primary" href=AppRoute::Signup.path()>"Get started"</a>
                    <a class="btn" href=AppRoute::Login.path()>"Log in"</a>
                </div>
            </section>
            <section class="landing-stages">
                {STAGES
                    .iter()
                    .map(|stage| {
                        view! {
                            <article class="landing-stage">
                                <h2>{stage.title}</h2>
                                <p>{stage.blurb}</p>
                            </article>
                        }
                    })
                    .collect::<Vec<_>>()}
            </section>
        </div>
    }
}
