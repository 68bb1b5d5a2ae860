//! Headline stat cards above the triage queue.

use leptos::prelude::*;

use crate::state::queue::{QueueState, queue_counts};

#[component]
pub fn QueueStats() -> impl IntoView {
    let queue = expect_context::<RwSignal<QueueState>>();
    let counts = move || queue_counts(&queue.get().entries);

    view! {
        <div class="stat-grid">
            <div class="stat-card">
                <span class="stat-card__value">{move || counts().total}</span>
                <span class="stat-card__label">"Total Patients"</span>
            </div>
            <div class="stat-card stat-card--critical">
                <span class="stat-card__value">{move || counts().critical}</span>
                <span class="stat-card__label">"Critical"</span>
            </div>
            <div class="stat-card stat-card--high">
                <span class="stat-card__value">{move || counts().high}</span>
                <span class="stat-card__label">"High Priority"</span>
            </div>
            <div class="stat-card">
                <span class="stat-card__value">{move || counts().waiting}</span>
                <span class="stat-card__label">"Waiting"</span>
            </div>
        </div>
    }
}
