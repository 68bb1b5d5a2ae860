//! One row in the doctor's triage queue.

#[cfg(test)]
#[path = "patient_card_test.rs"]
mod patient_card_test;

use leptos::prelude::*;

use crate::net::types::TriageEntry;
use crate::state::queue::urgency_rank;
use crate::util::time::entry_time;

/// Queue row with the urgency badge, patient identity, and arrival time.
/// Clicking anywhere on the row opens the detail view.
#[component]
pub fn PatientCard(entry: TriageEntry, on_select: Callback<TriageEntry>) -> impl IntoView {
    let badge_class = urgency_badge_class(entry.urgency_level.as_deref());
    let badge_text = display_urgency(entry.urgency_level.as_deref());
    let arrival = entry_time(&entry.created_at);
    let name = entry.name.clone();
    let age = entry.age;
    let status = entry.status.clone();

    let select = move |_| on_select.run(entry.clone());

    view! {
        <button class="patient-card" on:click=select>
            <span class=badge_class>{badge_text}</span>
            <span class="patient-card__name">{name}</span>
            <span class="patient-card__meta">{format!("Age: {age}")}</span>
            <span class="patient-card__status">{status}</span>
            <span class="patient-card__time">{arrival}</span>
        </button>
    }
}

/// Badge text: the raw wire label when present, otherwise the default band.
/// Unrecognized labels keep their own text so the doctor sees what the
/// assistant actually wrote.
pub(crate) fn display_urgency(label: Option<&str>) -> String {
    match label {
        Some(text) if !text.trim().is_empty() => text.to_owned(),
        _ => "Medium".to_owned(),
    }
}

/// Badge color follows the sort band, so unrecognized labels show in the
/// medium color.
pub(crate) fn urgency_badge_class(label: Option<&str>) -> &'static str {
    match urgency_rank(label) {
        0 => "urgency-badge urgency-badge--critical",
        1 => "urgency-badge urgency-badge--high",
        3 => "urgency-badge urgency-badge--low",
        _ => "urgency-badge urgency-badge--medium",
    }
}
