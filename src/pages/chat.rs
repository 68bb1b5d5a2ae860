//! Patient chat page for an active triage session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs the live conversation with the triage assistant: joins the
//! session's room, appends both sides of the exchange to the transcript,
//! and keeps the composing indicator honest with a reply timeout.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use serde_json::Value;

use events::{BotResponse, patient_room};

use crate::components::connection_badge::ConnectionBadge;
use crate::net::socket::SocketClient;
use crate::state::chat::{ChatState, MessageKind, MessageOrigin};
use crate::state::session::{Bootstrap, SessionState};
use crate::util::time::{clock_time, now_ms};

/// Subscriber id for every handler this page registers.
const SUBSCRIBER: &str = "patient-chat";

/// Chat screen. Without a seeded session (direct navigation, hard refresh)
/// it redirects straight back to the entry form.
#[component]
pub fn ChatPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let socket = expect_context::<SocketClient>();
    let navigate = use_navigate();

    let (session_id, patient_name) = match session.get_untracked().bootstrap() {
        Bootstrap::Ready {
            session_id,
            patient_name,
        } => (Some(session_id), patient_name),
        Bootstrap::RedirectToEntry => (None, String::new()),
    };
    let is_ready = session_id.is_some();

    let navigate_home = navigate.clone();
    Effect::new(move || {
        if session.get().bootstrap() == Bootstrap::RedirectToEntry {
            navigate_home("/", NavigateOptions::default());
        }
    });

    let status = socket.status();
    let connected = move || status.get().is_connected();

    if let Some(sid) = session_id.clone() {
        socket.subscribe(
            "bot_response",
            SUBSCRIBER,
            Rc::new(move |data: &Value| {
                if let Some((text, kind)) = remote_message_parts(data) {
                    chat.update(|c| c.append_remote(&text, kind.as_deref(), now_ms()));
                } else {
                    leptos::logging::warn!("bot_response without a message field, skipped");
                }
            }),
        );

        // Join on connect and again after every reconnect.
        let join_socket = socket.clone();
        let room = patient_room(&sid);
        Effect::new(move || {
            if status.get().is_connected() {
                join_socket.join_room(&room);
            }
        });

        let cleanup_socket = socket.clone();
        on_cleanup(move || {
            cleanup_socket.leave_room(&patient_room(&sid));
            cleanup_socket.unsubscribe_all(SUBSCRIBER);
        });
    }

    let input = RwSignal::new(String::new());

    let send_socket = socket.clone();
    let send_session = session_id.clone();
    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(sid) = send_session.clone() else {
            return;
        };
        let text = input.get_untracked();
        let Some(message) = chat
            .try_update(|c| c.append_local(&text, now_ms(), send_socket.is_connected()))
            .flatten()
        else {
            return;
        };
        input.set(String::new());
        let _ = send_socket.emit("patient_message", patient_message_payload(&sid, &message.text));

        #[cfg(feature = "hydrate")]
        {
            let mark = message.timestamp_ms;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(
                    crate::state::chat::REPLY_TIMEOUT_MS,
                ))
                .await;
                chat.update(|c| {
                    c.expire_composing(mark);
                });
            });
        }
    };

    // Pin the transcript to the newest message.
    let transcript_ref = NodeRef::<leptos::html::Div>::new();
    Effect::new(move || {
        chat.track();
        if let Some(el) = transcript_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let navigate_back = navigate.clone();
    let on_back = move |_| navigate_back("/", NavigateOptions::default());

    view! {
        <Show
            when=move || is_ready
            fallback=|| view! { <div class="chat-page"><p>"Redirecting..."</p></div> }
        >
            <div class="chat-page">
                <header class="chat-page__header">
                    <button class="chat-page__back" on:click=on_back.clone()>
                        "Back to Home"
                    </button>
                    <div class="chat-page__title">
                        <h1>"Medical Triage Chat"</h1>
                        <p>{format!("Patient: {patient_name}")}</p>
                    </div>
                    <ConnectionBadge />
                </header>

                <main class="chat-page__main">
                    <div class="chat-panel">
                        <div class="chat-panel__transcript" node_ref=transcript_ref>
                            <Show when=move || chat.get().messages.is_empty()>
                                <div class="chat-panel__welcome">
                                    <h3>"Welcome to your triage session"</h3>
                                    <p>
                                        "Please describe your symptoms and answer the questions \
                                         to help us assess your condition."
                                    </p>
                                </div>
                            </Show>

                            {move || {
                                chat.get()
                                    .messages
                                    .into_iter()
                                    .map(|message| {
                                        let row = row_class(message.origin);
                                        let bubble = bubble_class(message.origin, message.kind);
                                        let stamp = clock_time(message.timestamp_ms);
                                        view! {
                                            <div class=row>
                                                <div class=bubble>
                                                    <p class="chat-bubble__text">{message.text}</p>
                                                    <span class="chat-bubble__time">{stamp}</span>
                                                </div>
                                            </div>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}

                            <Show when=move || chat.get().composing>
                                <div class="chat-row chat-row--bot">
                                    <div class="chat-bubble chat-bubble--bot chat-bubble--typing">
                                        <span class="typing-dot"></span>
                                        <span class="typing-dot"></span>
                                        <span class="typing-dot"></span>
                                    </div>
                                </div>
                            </Show>

                            <Show when=move || chat.get().reply_timed_out>
                                <p class="chat-panel__timeout">
                                    "The assistant is taking longer than expected to respond."
                                </p>
                            </Show>
                        </div>

                        <form class="chat-panel__compose" on:submit=on_send.clone()>
                            <input
                                class="chat-panel__input"
                                type="text"
                                placeholder="Type your message..."
                                prop:value=move || input.get()
                                on:input=move |ev| input.set(event_target_value(&ev))
                                disabled=move || !connected()
                            />
                            <button
                                class="btn btn--primary"
                                type="submit"
                                disabled=move || input.get().trim().is_empty() || !connected()
                            >
                                "Send"
                            </button>
                        </form>

                        <Show when=move || !connected()>
                            <p class="chat-panel__offline">
                                "Connection lost. Please refresh the page."
                            </p>
                        </Show>
                    </div>

                    <p class="chat-page__hint">
                        "Be as detailed as possible when describing your symptoms. This \
                         helps our AI provide a more accurate assessment."
                    </p>
                </main>
            </div>
        </Show>
    }
}

/// Pull the text and optional kind tag out of a `bot_response` payload.
/// Payloads without a string `message` are ignored.
fn remote_message_parts(data: &Value) -> Option<(String, Option<String>)> {
    let payload: BotResponse = serde_json::from_value(data.clone()).ok()?;
    Some((payload.message, payload.kind))
}

fn patient_message_payload(session_id: &str, text: &str) -> Value {
    serde_json::json!({ "session_id": session_id, "message": text })
}

fn row_class(origin: MessageOrigin) -> &'static str {
    match origin {
        MessageOrigin::Remote => "chat-row chat-row--bot",
        MessageOrigin::Local => "chat-row chat-row--user",
    }
}

fn bubble_class(origin: MessageOrigin, kind: MessageKind) -> String {
    let side = match origin {
        MessageOrigin::Remote => "chat-bubble chat-bubble--bot",
        MessageOrigin::Local => "chat-bubble chat-bubble--user",
    };
    match kind {
        MessageKind::Question => format!("{side} chat-bubble--question"),
        MessageKind::Error => format!("{side} chat-bubble--error"),
        MessageKind::Chat => side.to_owned(),
    }
}
