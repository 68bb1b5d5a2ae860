use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn recording_handler(log: &Rc<RefCell<Vec<String>>>, tag: &str) -> EventHandler {
    let log = Rc::clone(log);
    let tag = tag.to_owned();
    Rc::new(move |data: &Value| {
        let text = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();
        log.borrow_mut().push(format!("{tag}:{text}"));
    })
}

// =============================================================
// EventRegistry: per-subscriber isolation
// =============================================================

#[test]
fn two_subscribers_to_one_event_both_receive() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = EventRegistry::default();
    registry.subscribe("bot_response", "chat-view", recording_handler(&log, "chat"));
    registry.subscribe("bot_response", "audit-view", recording_handler(&log, "audit"));

    let delivered = registry.dispatch("bot_response", &serde_json::json!({ "message": "hi" }));

    assert_eq!(delivered, 2);
    assert_eq!(*log.borrow(), vec!["audit:hi".to_owned(), "chat:hi".to_owned()]);
}

#[test]
fn unsubscribe_removes_only_that_subscriber() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = EventRegistry::default();
    registry.subscribe("bot_response", "chat-view", recording_handler(&log, "chat"));
    registry.subscribe("bot_response", "audit-view", recording_handler(&log, "audit"));

    registry.unsubscribe("bot_response", "audit-view");
    let delivered = registry.dispatch("bot_response", &serde_json::json!({ "message": "hi" }));

    assert_eq!(delivered, 1);
    assert_eq!(*log.borrow(), vec!["chat:hi".to_owned()]);
}

#[test]
fn resubscribe_replaces_handler_instead_of_duplicating() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = EventRegistry::default();
    registry.subscribe("bot_response", "chat-view", recording_handler(&log, "old"));
    registry.subscribe("bot_response", "chat-view", recording_handler(&log, "new"));

    let delivered = registry.dispatch("bot_response", &serde_json::json!({ "message": "hi" }));

    assert_eq!(delivered, 1);
    assert_eq!(*log.borrow(), vec!["new:hi".to_owned()]);
}

#[test]
fn unsubscribe_all_clears_a_subscriber_across_event_kinds() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = EventRegistry::default();
    registry.subscribe("bot_response", "dashboard", recording_handler(&log, "a"));
    registry.subscribe("new_patient", "dashboard", recording_handler(&log, "b"));
    registry.subscribe("new_patient", "sidebar", recording_handler(&log, "c"));

    registry.unsubscribe_all("dashboard");

    assert_eq!(registry.subscriber_count("bot_response"), 0);
    assert_eq!(registry.subscriber_count("new_patient"), 1);
}

#[test]
fn dispatch_without_subscribers_delivers_nothing() {
    let registry = EventRegistry::default();
    let delivered = registry.dispatch("new_patient", &serde_json::json!({}));
    assert_eq!(delivered, 0);
}

#[test]
fn unsubscribe_unknown_pair_is_a_no_op() {
    let mut registry = EventRegistry::default();
    registry.unsubscribe("bot_response", "nobody");
    registry.unsubscribe_all("nobody");
    assert_eq!(registry.subscriber_count("bot_response"), 0);
}

#[test]
fn snapshot_allows_resubscribe_during_delivery() {
    let registry = Rc::new(RefCell::new(EventRegistry::default()));
    let log = Rc::new(RefCell::new(Vec::new()));

    let registry_for_handler = Rc::clone(&registry);
    let log_for_handler = Rc::clone(&log);
    registry.borrow_mut().subscribe(
        "bot_response",
        "chat-view",
        Rc::new(move |_data: &Value| {
            log_for_handler.borrow_mut().push("first".to_owned());
            let log_for_replacement = Rc::clone(&log_for_handler);
            registry_for_handler.borrow_mut().subscribe(
                "bot_response",
                "chat-view",
                Rc::new(move |_data: &Value| {
                    log_for_replacement.borrow_mut().push("replacement".to_owned());
                }),
            );
        }),
    );

    // Snapshot-then-invoke, the way live dispatch does it.
    let handlers = registry.borrow().handlers_for("bot_response");
    for handler in handlers {
        handler(&serde_json::json!({}));
    }
    let handlers = registry.borrow().handlers_for("bot_response");
    for handler in handlers {
        handler(&serde_json::json!({}));
    }

    assert_eq!(
        *log.borrow(),
        vec!["first".to_owned(), "replacement".to_owned()]
    );
}

// =============================================================
// SocketSender: disconnected sends are dropped
// =============================================================

#[test]
fn sender_without_connection_reports_disconnected() {
    let sender = SocketSender::default();
    assert!(!sender.is_connected());
}

#[test]
fn sender_without_connection_drops_envelopes() {
    let sender = SocketSender::default();
    let envelope = events::Envelope::patient_message("sess-1", "hello");
    assert!(!sender.send(&envelope));
    // A second attempt behaves the same; nothing was queued.
    assert!(!sender.send(&envelope));
}

// =============================================================
// Room name gating
// =============================================================

#[test]
fn blank_room_names_are_invalid() {
    assert!(!room_name_valid(""));
    assert!(!room_name_valid("   "));
    assert!(room_name_valid("doctors"));
    assert!(room_name_valid("patient_abc"));
}
