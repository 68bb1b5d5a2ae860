//! Shared event model and JSON codec for the realtime channel.
//!
//! This crate owns the wire representation used by both the browser client
//! and the terminal client. The envelope keeps payloads flexible
//! (`serde_json::Value`); the typed structs below cover the event kinds the
//! triage backend speaks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Error returned by [`decode_event`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text could not be parsed as a JSON envelope.
    #[error("failed to parse event envelope: {0}")]
    Parse(#[from] serde_json::Error),
    /// The envelope carries a blank event name.
    #[error("event name is empty")]
    EmptyEvent,
}

/// Room joined by every signed-in doctor dashboard.
pub const DOCTORS_ROOM: &str = "doctors";

/// Room scoping one patient's chat session.
#[must_use]
pub fn patient_room(session_id: &str) -> String {
    format!("patient_{session_id}")
}

/// A single message on the realtime wire: an event name plus JSON payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Event kind, e.g. `"patient_message"`.
    pub event: String,
    /// Arbitrary JSON payload; `{}` when the event carries none.
    #[serde(default = "empty_object")]
    pub data: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Envelope {
    /// Build an envelope from an event name and payload.
    #[must_use]
    pub fn new(event: &str, data: Value) -> Self {
        Self {
            event: event.to_owned(),
            data,
        }
    }

    /// Join directive for a logical room.
    #[must_use]
    pub fn join(room: &str) -> Self {
        Self::new("join", json!({ "room": room }))
    }

    /// Leave directive for a logical room.
    #[must_use]
    pub fn leave(room: &str) -> Self {
        Self::new("leave", json!({ "room": room }))
    }

    /// Patient chat line bound to a triage session.
    #[must_use]
    pub fn patient_message(session_id: &str, message: &str) -> Self {
        Self::new(
            "patient_message",
            json!({ "session_id": session_id, "message": message }),
        )
    }
}

/// Encode an envelope into its JSON text form.
///
/// # Panics
///
/// Never panics in practice; the envelope shape (string keys, JSON-native
/// values) is always serializable.
#[must_use]
pub fn encode_event(envelope: &Envelope) -> String {
    serde_json::to_string(envelope).unwrap_or_default()
}

/// Decode JSON text into an envelope.
///
/// # Errors
///
/// Returns [`CodecError::Parse`] for malformed JSON and
/// [`CodecError::EmptyEvent`] when the event name is blank.
pub fn decode_event(text: &str) -> Result<Envelope, CodecError> {
    let envelope: Envelope = serde_json::from_str(text)?;
    if envelope.event.is_empty() {
        return Err(CodecError::EmptyEvent);
    }
    Ok(envelope)
}

/// Payload of the outbound `join` and `leave` directives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomDirective {
    /// Logical room name.
    pub room: String,
}

/// Payload of the outbound `patient_message` event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientMessage {
    /// Session the message belongs to.
    pub session_id: String,
    /// Message text as typed.
    pub message: String,
}

/// Payload of the inbound `bot_response` event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotResponse {
    /// Assistant reply text.
    pub message: String,
    /// Reply kind tag (`"chat"`, `"question"`, `"error"`); absent means chat.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Payload of the inbound `new_patient` notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    /// Row id of the arrived patient, when the server includes it.
    #[serde(default)]
    pub patient_id: Option<i64>,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
