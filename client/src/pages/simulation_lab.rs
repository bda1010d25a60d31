//! Simulation lab (signed-in users only; gated by the route table).

use leptos::prelude::*;

#[component]
pub fn SimulationLabPage() -> impl IntoView {
    view! {
        <div class="lab-page">
            <h1>"Simulation Lab"</h1>
            <p>"Sketch a scenario, adjust the inputs, and compare outcomes side by side."</p>
            <div class="lab-page__empty">"No simulations yet."</div>
        </div>
    }
}
