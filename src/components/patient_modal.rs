//! Patient detail overlay opened from the triage queue.

use leptos::prelude::*;

use crate::components::patient_card::{display_urgency, urgency_badge_class};
use crate::net::types::TriageEntry;
use crate::util::time::entry_timestamp;

/// Modal with the full triage record for one patient.
#[component]
pub fn PatientModal(entry: TriageEntry, on_close: Callback<()>) -> impl IntoView {
    let on_backdrop = move |_| on_close.run(());
    let on_close_click = move |_| on_close.run(());
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    let badge_class = urgency_badge_class(entry.urgency_level.as_deref());
    let badge_text = display_urgency(entry.urgency_level.as_deref());
    let summary = entry
        .summary
        .clone()
        .unwrap_or_else(|| "No summary available yet.".to_owned());

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <div
                class="dialog dialog--patient"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <h2>"Patient Details"</h2>

                <div class="dialog__grid">
                    <div class="dialog__row">
                        <span class="dialog__label">"Name"</span>
                        <span class="dialog__value">{entry.name.clone()}</span>
                    </div>
                    <div class="dialog__row">
                        <span class="dialog__label">"Age"</span>
                        <span class="dialog__value">{entry.age}</span>
                    </div>
                    <div class="dialog__row">
                        <span class="dialog__label">"Status"</span>
                        <span class="dialog__value">{entry.status.clone()}</span>
                    </div>
                    <div class="dialog__row">
                        <span class="dialog__label">"Urgency Level"</span>
                        <span class=badge_class>{badge_text}</span>
                    </div>
                </div>

                <div class="dialog__summary">
                    <span class="dialog__label">"Triage Summary"</span>
                    <p class="dialog__summary-text">{summary}</p>
                </div>

                <div class="dialog__session">
                    <span class="dialog__label">"Session Information"</span>
                    <div class="dialog__row">
                        <span class="dialog__label">"Created"</span>
                        <span class="dialog__value">{entry_timestamp(&entry.created_at)}</span>
                    </div>
                    <div class="dialog__row">
                        <span class="dialog__label">"Session ID"</span>
                        <span class="dialog__value dialog__value--mono">{entry.session_id.clone()}</span>
                    </div>
                </div>

                <div class="dialog__actions">
                    <button class="btn btn--primary" on:click=on_close_click>"Close"</button>
                </div>
            </div>
        </div>
    }
}
