use super::*;

// ============================================================================
// Inbound payload parsing
// ============================================================================

#[test]
fn remote_message_parts_reads_text_and_kind() {
    let data = serde_json::json!({ "message": "How long has this lasted?", "type": "question" });
    assert_eq!(
        remote_message_parts(&data),
        Some(("How long has this lasted?".to_owned(), Some("question".to_owned())))
    );
}

#[test]
fn remote_message_parts_defaults_the_kind() {
    let data = serde_json::json!({ "message": "Noted, thank you." });
    assert_eq!(
        remote_message_parts(&data),
        Some(("Noted, thank you.".to_owned(), None))
    );
}

#[test]
fn remote_message_parts_rejects_payloads_without_text() {
    assert_eq!(remote_message_parts(&serde_json::json!({})), None);
    assert_eq!(remote_message_parts(&serde_json::json!({ "message": 42 })), None);
    assert_eq!(remote_message_parts(&serde_json::json!("plain string")), None);
}

#[test]
fn remote_message_parts_ignores_extra_fields() {
    let data = serde_json::json!({ "message": "ok", "session_id": "abc", "seq": 9 });
    assert_eq!(remote_message_parts(&data), Some(("ok".to_owned(), None)));
}

// ============================================================================
// Outbound payloads
// ============================================================================

#[test]
fn patient_message_payload_carries_session_and_text() {
    assert_eq!(
        patient_message_payload("sess-1", "my chest hurts"),
        serde_json::json!({ "session_id": "sess-1", "message": "my chest hurts" })
    );
}

// ============================================================================
// Bubble styling
// ============================================================================

#[test]
fn rows_align_by_origin() {
    assert_eq!(row_class(MessageOrigin::Remote), "chat-row chat-row--bot");
    assert_eq!(row_class(MessageOrigin::Local), "chat-row chat-row--user");
}

#[test]
fn bubbles_pick_up_the_kind_modifier() {
    assert_eq!(
        bubble_class(MessageOrigin::Remote, MessageKind::Chat),
        "chat-bubble chat-bubble--bot"
    );
    assert_eq!(
        bubble_class(MessageOrigin::Remote, MessageKind::Question),
        "chat-bubble chat-bubble--bot chat-bubble--question"
    );
    assert_eq!(
        bubble_class(MessageOrigin::Remote, MessageKind::Error),
        "chat-bubble chat-bubble--bot chat-bubble--error"
    );
    assert_eq!(
        bubble_class(MessageOrigin::Local, MessageKind::Chat),
        "chat-bubble chat-bubble--user"
    );
}
