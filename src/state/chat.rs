//! Transcript state for the active triage chat.
//!
//! The log is append-only: messages are never mutated, removed, or
//! re-sorted, so render order is exactly arrival order on the single-threaded
//! event stream. The composing indicator is true only between a local append
//! and the next remote append or its timeout expiry.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// How long the composing indicator may wait for a reply before it
/// auto-clears and the view surfaces a timeout notice.
pub const REPLY_TIMEOUT_MS: u64 = 30_000;

/// Who authored a transcript message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageOrigin {
    /// Typed by the patient in this browser.
    Local,
    /// Pushed by the server (triage assistant).
    Remote,
}

/// Server-assigned flavor of an assistant message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    /// Plain conversational text.
    #[default]
    Chat,
    /// The assistant is asking the patient something.
    Question,
    /// The assistant reported a failure.
    Error,
}

impl MessageKind {
    /// Map the wire `type` tag to a kind; anything unrecognized or absent
    /// is plain chat.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("question") => Self::Question,
            Some("error") => Self::Error,
            _ => Self::Chat,
        }
    }
}

/// One transcript entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    /// Opaque monotonic token derived from creation time and a sequence.
    pub id: String,
    /// Message text.
    pub text: String,
    /// Local or remote author.
    pub origin: MessageOrigin,
    /// Creation instant in milliseconds since the epoch.
    pub timestamp_ms: f64,
    /// Assistant flavor; local messages are always plain chat.
    pub kind: MessageKind,
}

/// Ordered message log plus the composing indicator for one session.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    /// Append-only transcript in arrival order.
    pub messages: Vec<ChatMessage>,
    /// True while a local message awaits the assistant's reply.
    pub composing: bool,
    /// True once a reply wait expired; cleared by the next activity.
    pub reply_timed_out: bool,
    /// Timestamp mark of the local append that armed the indicator.
    composing_since_ms: Option<f64>,
    /// Sequence counter feeding message ids.
    next_seq: u64,
}

impl ChatState {
    /// Append a patient-authored message.
    ///
    /// Rejects (returns `None`, leaves the log untouched) when the trimmed
    /// text is empty or the connection is down. On success the composing
    /// indicator is armed and the appended message is returned so the caller
    /// can forward it outbound and schedule the reply timeout against its
    /// timestamp.
    pub fn append_local(&mut self, text: &str, now_ms: f64, connected: bool) -> Option<ChatMessage> {
        let trimmed = text.trim();
        if trimmed.is_empty() || !connected {
            return None;
        }

        let message = ChatMessage {
            id: self.next_message_id(now_ms),
            text: trimmed.to_owned(),
            origin: MessageOrigin::Local,
            timestamp_ms: now_ms,
            kind: MessageKind::Chat,
        };
        self.messages.push(message.clone());
        self.composing = true;
        self.composing_since_ms = Some(now_ms);
        self.reply_timed_out = false;
        Some(message)
    }

    /// Append an assistant message and clear the composing indicator.
    pub fn append_remote(&mut self, text: &str, kind_label: Option<&str>, now_ms: f64) {
        let message = ChatMessage {
            id: self.next_message_id(now_ms),
            text: text.to_owned(),
            origin: MessageOrigin::Remote,
            timestamp_ms: now_ms,
            kind: MessageKind::from_label(kind_label),
        };
        self.messages.push(message);
        self.composing = false;
        self.composing_since_ms = None;
        self.reply_timed_out = false;
    }

    /// Expire the composing indicator armed at `mark_ms`.
    ///
    /// Only fires when that exact wait is still pending: a reply or a newer
    /// local append makes the old expiry inert. Returns whether it fired.
    pub fn expire_composing(&mut self, mark_ms: f64) -> bool {
        if self.composing && self.composing_since_ms == Some(mark_ms) {
            self.composing = false;
            self.composing_since_ms = None;
            self.reply_timed_out = true;
            return true;
        }
        false
    }

    /// Drop the transcript for a new session. Ids keep counting up so they
    /// stay unique across sessions.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.composing = false;
        self.composing_since_ms = None;
        self.reply_timed_out = false;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn next_message_id(&mut self, now_ms: f64) -> String {
        self.next_seq += 1;
        format!("m-{}-{}", now_ms.max(0.0) as u64, self.next_seq)
    }
}
