//! Realtime socket client for the triage event channel.
//!
//! The `SocketClient` owns the application's single WebSocket: connection,
//! reconnection with exponential backoff, JSON envelope dispatch, and status
//! signal updates. Views share one clone each and talk to it through
//! emit/join/subscribe; none of them ever opens or closes the transport.
//!
//! Subscriptions live in a per-subscriber registry keyed by
//! (event kind, subscriber id), so two views listening to the same event
//! kind never clobber each other's handlers; a dismounting view removes all
//! of its own with one call.
//!
//! All transport logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment; the registry and send gating are plain
//! code so they test natively.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures turn into status transitions and logging, never
//! surfaced errors; emits while disconnected are dropped, not queued, and
//! report `false` so callers can keep their affordances disabled.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::{
    GetUntracked, LocalStorage, RwSignal, StoredValue, UpdateValue, WithUntracked,
};
#[cfg(feature = "hydrate")]
use leptos::prelude::{Set, WithValue};
use serde_json::Value;

use crate::state::connection::ConnectionStatus;

/// Callback invoked with the `data` payload of a matching inbound event.
pub type EventHandler = Rc<dyn Fn(&Value)>;

/// Per-subscriber handler registry: event kind -> subscriber id -> handler.
///
/// Re-registering the same (kind, subscriber) pair replaces only that
/// handler. Delivery order within a kind follows subscriber id so dispatch
/// stays deterministic.
#[derive(Clone, Default)]
pub struct EventRegistry {
    handlers: HashMap<String, BTreeMap<String, EventHandler>>,
}

impl EventRegistry {
    /// Register `handler` for `event` under `subscriber`.
    pub fn subscribe(&mut self, event: &str, subscriber: &str, handler: EventHandler) {
        self.handlers
            .entry(event.to_owned())
            .or_default()
            .insert(subscriber.to_owned(), handler);
    }

    /// Remove one subscriber's handler for one event kind.
    pub fn unsubscribe(&mut self, event: &str, subscriber: &str) {
        if let Some(slots) = self.handlers.get_mut(event) {
            slots.remove(subscriber);
            if slots.is_empty() {
                self.handlers.remove(event);
            }
        }
    }

    /// Remove every handler a subscriber registered, across all event kinds.
    ///
    /// Teardown hook for a dismounting view.
    pub fn unsubscribe_all(&mut self, subscriber: &str) {
        self.handlers.retain(|_, slots| {
            slots.remove(subscriber);
            !slots.is_empty()
        });
    }

    /// Snapshot the handlers registered for an event kind.
    ///
    /// Cloned out so a handler may subscribe or unsubscribe mid-dispatch
    /// without aliasing the registry.
    #[must_use]
    pub fn handlers_for(&self, event: &str) -> Vec<EventHandler> {
        self.handlers
            .get(event)
            .map(|slots| slots.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of subscribers currently registered for an event kind.
    #[must_use]
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, BTreeMap::len)
    }

    /// Invoke every handler registered for `event` with `data`.
    ///
    /// Returns how many handlers ran.
    pub fn dispatch(&self, event: &str, data: &Value) -> usize {
        let handlers = self.handlers_for(event);
        for handler in &handlers {
            handler(data);
        }
        handlers.len()
    }
}

/// Outbound side of the socket.
///
/// Wraps the forwarding channel of the current connection; empty while
/// disconnected. A fresh channel is created per connection, so nothing
/// written while down is queued for later delivery.
#[derive(Clone, Default)]
pub struct SocketSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
}

impl SocketSender {
    #[cfg(feature = "hydrate")]
    fn connected(tx: futures::channel::mpsc::UnboundedSender<String>) -> Self {
        Self { tx: Some(tx) }
    }

    /// True while the current connection's forwarding channel is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }

    /// Send an envelope to the server.
    ///
    /// Returns `false` if there is no open connection; the envelope is
    /// dropped in that case, never queued.
    pub fn send(&self, envelope: &events::Envelope) -> bool {
        #[cfg(feature = "hydrate")]
        {
            match &self.tx {
                Some(tx) => tx.unbounded_send(events::encode_event(envelope)).is_ok(),
                None => false,
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = envelope;
            false
        }
    }
}

fn room_name_valid(room: &str) -> bool {
    !room.trim().is_empty()
}

/// Handle to the application's single realtime connection.
///
/// Cheap to clone; every clone shares the same status signal, sender slot,
/// and handler registry. The app shell creates one and provides it via
/// context.
#[derive(Clone)]
pub struct SocketClient {
    status: RwSignal<ConnectionStatus>,
    sender: RwSignal<SocketSender>,
    // The registry holds `Rc` handlers, so it lives in local arena storage
    // behind a `Send + Sync` handle; everything runs on the browser thread.
    registry: StoredValue<EventRegistry, LocalStorage>,
    started: Arc<AtomicBool>,
}

impl SocketClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: RwSignal::new(ConnectionStatus::default()),
            sender: RwSignal::new(SocketSender::default()),
            registry: StoredValue::new_local(EventRegistry::default()),
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Connection status signal for views to observe.
    #[must_use]
    pub fn status(&self) -> RwSignal<ConnectionStatus> {
        self.status
    }

    /// Untracked status probe for imperative paths.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.status.get_untracked().is_connected()
    }

    /// Start the connection lifecycle. Idempotent; only the first call
    /// spawns the transport loop.
    pub fn connect(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let status = self.status;
            let sender = self.sender;
            let registry = self.registry;
            leptos::task::spawn_local(socket_loop(status, sender, registry));
        }
    }

    /// Emit an event to the server. Dropped with `false` while disconnected.
    pub fn emit(&self, event: &str, data: Value) -> bool {
        self.sender
            .with_untracked(|s| s.send(&events::Envelope::new(event, data)))
    }

    /// Send a join directive for a logical room. Fire-and-forget; dropped
    /// (returns `false`) when the room name is blank or the connection is
    /// down, so callers re-join after a reconnect.
    pub fn join_room(&self, room: &str) -> bool {
        if !room_name_valid(room) {
            return false;
        }
        self.sender
            .with_untracked(|s| s.send(&events::Envelope::join(room)))
    }

    /// Send a leave directive for a logical room. Same gating as
    /// [`SocketClient::join_room`].
    pub fn leave_room(&self, room: &str) -> bool {
        if !room_name_valid(room) {
            return false;
        }
        self.sender
            .with_untracked(|s| s.send(&events::Envelope::leave(room)))
    }

    /// Register a handler for an inbound event kind under a subscriber id.
    pub fn subscribe(&self, event: &str, subscriber: &str, handler: EventHandler) {
        self.registry
            .update_value(|r| r.subscribe(event, subscriber, handler));
    }

    /// Remove one subscriber's handler for one event kind.
    pub fn unsubscribe(&self, event: &str, subscriber: &str) {
        self.registry
            .update_value(|r| r.unsubscribe(event, subscriber));
    }

    /// Remove every handler a subscriber registered.
    pub fn unsubscribe_all(&self, subscriber: &str) {
        self.registry.update_value(|r| r.unsubscribe_all(subscriber));
    }
}

impl Default for SocketClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Socket URL on the page origin, scheme chosen by page protocol.
#[cfg(feature = "hydrate")]
fn socket_url() -> String {
    let location = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default();
    let ws_proto = if location.starts_with("https") { "wss" } else { "ws" };
    let host = web_sys::window()
        .and_then(|w| w.location().host().ok())
        .unwrap_or_else(|| "localhost:5000".to_owned());
    format!("{ws_proto}://{host}/ws")
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "hydrate")]
async fn socket_loop(
    status: RwSignal<ConnectionStatus>,
    sender: RwSignal<SocketSender>,
    registry: StoredValue<EventRegistry, LocalStorage>,
) {
    let mut backoff_ms: u32 = 1000;
    let max_backoff_ms: u32 = 10_000;

    loop {
        status.set(ConnectionStatus::Connecting);

        match connect_and_run(&socket_url(), status, sender, registry).await {
            Ok(()) => {
                leptos::logging::log!("socket disconnected");
                // The open succeeded, so the next attempt starts fresh.
                backoff_ms = 1000;
            }
            Err(e) => {
                leptos::logging::warn!("socket connect failed: {e}");
            }
        }

        // Drop the connection's forwarding channel so emits fail instead of
        // queueing while the transport is down.
        sender.set(SocketSender::default());
        status.set(ConnectionStatus::Disconnected);

        // Exponential backoff before reconnect.
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = (backoff_ms * 2).min(max_backoff_ms);
    }
}

/// Connect to the socket and process messages until disconnect.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    status: RwSignal<ConnectionStatus>,
    sender: RwSignal<SocketSender>,
    registry: StoredValue<EventRegistry, LocalStorage>,
) -> Result<(), String> {
    use futures::StreamExt;
    use futures::channel::mpsc;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    let (tx, mut rx) = mpsc::unbounded::<String>();
    sender.set(SocketSender::connected(tx));
    status.set(ConnectionStatus::Connected);

    // Forward outgoing envelopes from the channel to the socket.
    let send_task = async {
        use futures::SinkExt;
        while let Some(text) = rx.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    // Receive loop: decode and dispatch incoming envelopes.
    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match events::decode_event(&text) {
                    Ok(envelope) => dispatch_event(registry, &envelope),
                    Err(e) => leptos::logging::warn!("undecodable socket event: {e}"),
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("socket recv error: {e}");
                    break;
                }
            }
        }
    };

    // Run send/recv; when either finishes, the connection is done.
    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(())
}

/// Deliver an inbound envelope to every handler registered for its kind.
#[cfg(feature = "hydrate")]
fn dispatch_event(registry: StoredValue<EventRegistry, LocalStorage>, envelope: &events::Envelope) {
    // Snapshot before invoking so a handler may re-subscribe mid-dispatch.
    let handlers = registry.with_value(|r| r.handlers_for(&envelope.event));
    if handlers.is_empty() {
        leptos::logging::log!("socket event with no subscriber: {}", envelope.event);
        return;
    }
    for handler in handlers {
        handler(&envelope.data);
    }
}
