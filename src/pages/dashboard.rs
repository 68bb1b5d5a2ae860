//! Doctor dashboard listing the live triage queue.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It fetches the patient queue
//! over REST, joins the doctors room for push notifications, and refetches
//! whenever a new patient finishes intake.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use events::DOCTORS_ROOM;

use crate::components::connection_badge::ConnectionBadge;
use crate::components::patient_card::PatientCard;
use crate::components::patient_modal::PatientModal;
use crate::components::queue_stats::QueueStats;
use crate::net::socket::SocketClient;
use crate::net::types::{TriageEntry, User};
use crate::state::auth::AuthState;
use crate::state::queue::{QueueState, sorted_for_display};
use crate::util::auth::{clear_token, install_unauth_redirect};

/// Subscriber id for every handler this page registers.
const SUBSCRIBER: &str = "doctor-dashboard";

/// Dashboard page. Redirects to `/login` once the auth restore settles
/// without a signed-in doctor.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let queue = expect_context::<RwSignal<QueueState>>();
    let socket = expect_context::<SocketClient>();
    let navigate = use_navigate();

    install_unauth_redirect(auth, navigate.clone());

    // First fetch, once the restore has produced a signed-in doctor.
    let fetched_once = RwSignal::new(false);
    let fetch_navigate = navigate.clone();
    Effect::new(move || {
        let state = auth.get();
        if fetched_once.get() || state.loading || state.user.is_none() {
            return;
        }
        fetched_once.set(true);
        refresh_patients(queue, auth, fetch_navigate.clone());
    });

    // Refetch whenever a patient completes intake.
    let push_navigate = navigate.clone();
    socket.subscribe(
        "new_patient",
        SUBSCRIBER,
        Rc::new(move |_data: &serde_json::Value| {
            refresh_patients(queue, auth, push_navigate.clone());
        }),
    );

    // Join on connect and again after every reconnect.
    let status = socket.status();
    let join_socket = socket.clone();
    Effect::new(move || {
        if status.get().is_connected() {
            join_socket.join_room(DOCTORS_ROOM);
        }
    });

    let cleanup_socket = socket.clone();
    on_cleanup(move || {
        cleanup_socket.leave_room(DOCTORS_ROOM);
        cleanup_socket.unsubscribe_all(SUBSCRIBER);
    });

    let selected = RwSignal::new(None::<TriageEntry>);
    let on_select = Callback::new(move |entry: TriageEntry| selected.set(Some(entry)));
    let on_modal_close = Callback::new(move |()| selected.set(None));

    let refresh_navigate = navigate.clone();
    let on_refresh = move |_| refresh_patients(queue, auth, refresh_navigate.clone());

    let logout_navigate = navigate.clone();
    let on_logout = move |_| {
        // Navigate first so the unauth guard is disposed before auth clears.
        logout_navigate("/", NavigateOptions::default());
        clear_token();
        queue.set(QueueState::default());
        auth.update(AuthState::sign_out);
    };

    view! {
        <Show
            when=move || !auth.get().loading && auth.get().user.is_some()
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>
                            {move || {
                                if auth.get().loading { "Loading..." } else { "Redirecting to login..." }
                            }}
                        </p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <header class="dashboard-page__header">
                    <div class="dashboard-page__title">
                        <h1>"Doctor Dashboard"</h1>
                        <p>{move || welcome_line(auth.get().user.as_ref())}</p>
                    </div>

                    <div class="dashboard-page__controls">
                        <ConnectionBadge up_label="Live" down_label="Offline" />
                        <button class="btn" on:click=on_refresh.clone()>"Refresh"</button>
                        <button class="btn" on:click=on_logout.clone()>"Logout"</button>
                    </div>
                </header>

                <main class="dashboard-page__main">
                    <QueueStats />

                    <section class="queue-panel">
                        <div class="queue-panel__heading">
                            <h2>"Patient Queue"</h2>
                            <span class="queue-panel__live-hint">"Real-time updates"</span>
                        </div>

                        <Show when=move || queue.get().error.is_some()>
                            <p class="queue-panel__error">
                                {move || queue.get().error.unwrap_or_default()}
                            </p>
                        </Show>

                        <Show
                            when=move || queue.get().loaded
                            fallback=move || view! { <p>"Loading patients..."</p> }
                        >
                            <Show
                                when=move || !queue.get().entries.is_empty()
                                fallback=move || {
                                    view! {
                                        <div class="queue-panel__empty">
                                            <h3>"No patients in queue"</h3>
                                            <p>
                                                "Patients will appear here as they complete \
                                                 their triage assessment."
                                            </p>
                                        </div>
                                    }
                                }
                            >
                                <div class="queue-panel__rows">
                                    {move || {
                                        sorted_for_display(&queue.get().entries)
                                            .into_iter()
                                            .map(|entry| {
                                                view! {
                                                    <PatientCard entry=entry on_select=on_select />
                                                }
                                            })
                                            .collect::<Vec<_>>()
                                    }}
                                </div>
                            </Show>
                        </Show>
                    </section>
                </main>

                {move || {
                    selected
                        .get()
                        .map(|entry| view! { <PatientModal entry=entry on_close=on_modal_close /> })
                }}
            </div>
        </Show>
    }
}

/// Kick off a queue fetch for the signed-in doctor. A rejected token clears
/// the session and sends the doctor back to the login form; other failures
/// surface in the panel while the previous entries stay visible.
fn refresh_patients<F>(queue: RwSignal<QueueState>, auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let Some(token) = auth.get_untracked().token else {
        return;
    };
    let ticket = queue.try_update(QueueState::begin_refresh).unwrap_or_default();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_patients(&token).await {
            Ok(entries) => {
                queue.update(|q| {
                    q.apply_snapshot(ticket, entries);
                });
            }
            Err(message) => {
                if crate::net::api::is_auth_failure(&message) {
                    clear_token();
                    auth.update(AuthState::sign_out);
                    navigate("/login", NavigateOptions::default());
                } else {
                    queue.update(|q| {
                        q.apply_failure(ticket, message);
                    });
                }
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, ticket, navigate);
    }
}

fn welcome_line(user: Option<&User>) -> String {
    user.map_or_else(
        || "Welcome back".to_owned(),
        |u| format!("Welcome back, Dr. {}", u.name),
    )
}
