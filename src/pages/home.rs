//! Public landing page with the triage intake form.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the unauthenticated entry point. Submitting the form opens a
//! triage session on the server, seeds the session state, and moves the
//! patient into the chat screen.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::chat::ChatState;
use crate::state::session::{SessionHandoff, SessionState};

/// Upper bound the intake form accepts for age, inclusive.
const MAX_AGE: i64 = 120;

/// Landing page with the name and age intake form plus the doctor login link.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let age = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (patient_name, patient_age) = match validate_entry_form(&name.get(), &age.get()) {
            Ok(fields) => fields,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::start_triage(&patient_name, patient_age).await {
                    Ok(response) => {
                        chat.update(ChatState::reset);
                        session.update(|s| {
                            s.seed(SessionHandoff {
                                session_id: response.session_id,
                                patient_name,
                            });
                        });
                        navigate("/patient/chat", NavigateOptions::default());
                    }
                    Err(message) => {
                        error.set(message);
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&navigate, patient_name, patient_age, session, chat);
        }
    };

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1 class="home-page__brand">"MedTriage"</h1>
                <a href="/login" class="btn home-page__doctor-link">"Doctor Login"</a>
            </header>

            <main class="home-page__main">
                <div class="home-page__hero">
                    <h1>"AI-Powered Medical Triage"</h1>
                    <p>
                        "Get instant medical assessment and priority ranking. Our system \
                         helps healthcare providers make informed decisions quickly."
                    </p>
                </div>

                <div class="home-page__features">
                    <div class="feature">
                        <h3>"24/7 Availability"</h3>
                        <p>"Access medical triage assessment anytime, anywhere"</p>
                    </div>
                    <div class="feature">
                        <h3>"AI-Powered Analysis"</h3>
                        <p>"Advanced machine learning for accurate symptom assessment"</p>
                    </div>
                    <div class="feature">
                        <h3>"Patient-Centric"</h3>
                        <p>"Personalized care based on individual symptoms and history"</p>
                    </div>
                </div>

                <div class="entry-card">
                    <h2>"Start Your Triage"</h2>
                    <p class="entry-card__subtitle">"Enter your information to begin assessment"</p>

                    <Show when=move || !error.get().is_empty()>
                        <p class="entry-card__error">{move || error.get()}</p>
                    </Show>

                    <form class="entry-form" on:submit=on_submit>
                        <label class="entry-form__label">
                            "Full Name"
                            <input
                                class="entry-form__input"
                                type="text"
                                placeholder="Enter your full name"
                                prop:value=move || name.get()
                                on:input=move |ev| name.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="entry-form__label">
                            "Age"
                            <input
                                class="entry-form__input"
                                type="number"
                                min="0"
                                max="120"
                                placeholder="Enter your age"
                                prop:value=move || age.get()
                                on:input=move |ev| age.set(event_target_value(&ev))
                            />
                        </label>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Starting..." } else { "Begin Assessment" }}
                        </button>
                    </form>
                </div>

                <p class="home-page__disclaimer">
                    "This system is designed to assist healthcare professionals and should \
                     not replace professional medical advice. In case of emergency, please \
                     call emergency services immediately."
                </p>
            </main>
        </div>
    }
}

/// Check the intake fields, returning the trimmed name and parsed age.
fn validate_entry_form(name: &str, age: &str) -> Result<(String, i64), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Enter your full name.");
    }
    let Ok(age) = age.trim().parse::<i64>() else {
        return Err("Enter an age between 0 and 120.");
    };
    if !(0..=MAX_AGE).contains(&age) {
        return Err("Enter an age between 0 and 120.");
    }
    Ok((name.to_owned(), age))
}
