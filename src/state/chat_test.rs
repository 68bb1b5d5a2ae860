use super::{ChatState, MessageKind, MessageOrigin};

// ============================================================================
// Appending
// ============================================================================

#[test]
fn local_then_remote_preserves_arrival_order() {
    let mut chat = ChatState::default();
    let turns = ["I have a headache", "My left arm is numb", "Since this morning"];
    let replies = ["How long has this lasted?", "Any vision changes?", "Thank you"];

    for (i, (ask, answer)) in turns.iter().zip(replies.iter()).enumerate() {
        let now = 1_000.0 + i as f64;
        chat.append_local(ask, now, true).expect("local append");
        chat.append_remote(answer, Some("question"), now + 0.5);
    }

    assert_eq!(chat.messages.len(), 6);
    for (i, message) in chat.messages.iter().enumerate() {
        let expected = if i % 2 == 0 {
            MessageOrigin::Local
        } else {
            MessageOrigin::Remote
        };
        assert_eq!(message.origin, expected, "position {i}");
    }
    assert_eq!(chat.messages[0].text, "I have a headache");
    assert_eq!(chat.messages[5].text, "Thank you");
}

#[test]
fn append_local_trims_and_rejects_blank_text() {
    let mut chat = ChatState::default();

    assert!(chat.append_local("", 1.0, true).is_none());
    assert!(chat.append_local("   \t  ", 2.0, true).is_none());
    assert!(chat.messages.is_empty());
    assert!(!chat.composing);

    let sent = chat.append_local("  chest pain  ", 3.0, true).expect("append");
    assert_eq!(sent.text, "chest pain");
}

#[test]
fn append_local_rejects_while_disconnected() {
    let mut chat = ChatState::default();

    assert!(chat.append_local("hello?", 1.0, false).is_none());
    assert!(chat.messages.is_empty());
    assert!(!chat.composing);
}

#[test]
fn local_messages_are_plain_chat() {
    let mut chat = ChatState::default();
    let sent = chat.append_local("hi", 1.0, true).expect("append");

    assert_eq!(sent.kind, MessageKind::Chat);
    assert_eq!(sent.timestamp_ms, 1.0);
}

#[test]
fn remote_kind_comes_from_the_wire_label() {
    let mut chat = ChatState::default();
    chat.append_remote("what hurts?", Some("question"), 1.0);
    chat.append_remote("service unavailable", Some("error"), 2.0);
    chat.append_remote("noted", Some("summary"), 3.0);
    chat.append_remote("ok", None, 4.0);

    let kinds: Vec<MessageKind> = chat.messages.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MessageKind::Question,
            MessageKind::Error,
            MessageKind::Chat,
            MessageKind::Chat,
        ]
    );
}

// ============================================================================
// Message ids
// ============================================================================

#[test]
fn ids_are_unique_even_at_the_same_instant() {
    let mut chat = ChatState::default();
    chat.append_local("one", 5_000.0, true).expect("append");
    chat.append_local("two", 5_000.0, true).expect("append");
    chat.append_remote("three", None, 5_000.0);

    assert_eq!(chat.messages[0].id, "m-5000-1");
    assert_eq!(chat.messages[1].id, "m-5000-2");
    assert_eq!(chat.messages[2].id, "m-5000-3");
}

// ============================================================================
// Composing indicator
// ============================================================================

#[test]
fn composing_arms_on_local_and_clears_on_remote() {
    let mut chat = ChatState::default();
    assert!(!chat.composing);

    chat.append_local("hello", 1.0, true).expect("append");
    assert!(chat.composing);

    chat.append_remote("hi there", None, 2.0);
    assert!(!chat.composing);
}

#[test]
fn remote_without_prior_local_leaves_composing_off() {
    let mut chat = ChatState::default();
    chat.append_remote("welcome", None, 1.0);

    assert!(!chat.composing);
    assert!(!chat.reply_timed_out);
}

#[test]
fn expiry_fires_only_for_the_pending_wait() {
    let mut chat = ChatState::default();
    let sent = chat.append_local("anyone there?", 100.0, true).expect("append");

    assert!(chat.expire_composing(sent.timestamp_ms));
    assert!(!chat.composing);
    assert!(chat.reply_timed_out);
}

#[test]
fn expiry_is_inert_after_a_reply_arrived() {
    let mut chat = ChatState::default();
    let sent = chat.append_local("hello", 100.0, true).expect("append");
    chat.append_remote("hi", None, 150.0);

    assert!(!chat.expire_composing(sent.timestamp_ms));
    assert!(!chat.composing);
    assert!(!chat.reply_timed_out);
}

#[test]
fn expiry_is_inert_after_a_newer_local_append() {
    let mut chat = ChatState::default();
    let first = chat.append_local("hello", 100.0, true).expect("append");
    chat.append_local("still there?", 200.0, true).expect("append");

    assert!(!chat.expire_composing(first.timestamp_ms));
    assert!(chat.composing, "the newer wait stays armed");
    assert!(!chat.reply_timed_out);
}

#[test]
fn next_local_append_clears_a_surfaced_timeout() {
    let mut chat = ChatState::default();
    let sent = chat.append_local("hello", 100.0, true).expect("append");
    chat.expire_composing(sent.timestamp_ms);
    assert!(chat.reply_timed_out);

    chat.append_local("retrying", 50_000.0, true).expect("append");
    assert!(!chat.reply_timed_out);
    assert!(chat.composing);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn reset_drops_the_transcript_but_keeps_ids_advancing() {
    let mut chat = ChatState::default();
    chat.append_local("old session", 1_000.0, true).expect("append");
    chat.reset();

    assert!(chat.messages.is_empty());
    assert!(!chat.composing);
    assert!(!chat.reply_timed_out);

    let sent = chat.append_local("new session", 2_000.0, true).expect("append");
    assert_eq!(sent.id, "m-2000-2");
}
