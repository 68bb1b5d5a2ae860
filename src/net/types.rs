//! REST DTOs for the triage backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON payloads. The backend sits on a
//! dynamically typed store, so numeric fields arrive as numbers or numeric
//! strings depending on how a row was created; the lenient deserializer
//! absorbs that instead of failing the whole snapshot.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One patient row in the doctor queue, as returned by `/api/doctor/patients`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriageEntry {
    /// Row identifier.
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    /// Patient display name.
    pub name: String,
    /// Patient age in years.
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub age: i64,
    /// Server-side creation instant (naive ISO-8601, no timezone).
    pub created_at: NaiveDateTime,
    /// Assessment status tag, e.g. `"waiting"` or `"in_progress"`.
    pub status: String,
    /// AI triage summary, once the assessment produced one.
    #[serde(default)]
    pub summary: Option<String>,
    /// Session binding this row to its chat transcript.
    pub session_id: String,
    /// Urgency tag (`"Critical"`, `"High"`, `"Medium"`, `"Low"`), if assessed.
    #[serde(default)]
    pub urgency_level: Option<String>,
}

/// Envelope of the `/api/doctor/patients` response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientsResponse {
    /// Full queue snapshot; each fetch replaces the previous one wholesale.
    pub patients: Vec<TriageEntry>,
}

/// An authenticated doctor account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Account identifier.
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Doctor-role flag; gates the dashboard.
    #[serde(default)]
    pub is_doctor: bool,
}

/// Envelope of the `/api/auth/me` response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    /// The account the presented bearer token belongs to.
    pub user: User,
}

/// Successful `/api/auth/login` response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent authenticated calls.
    pub token: String,
    /// The signed-in account.
    pub user: User,
}

/// Successful `/api/start_triage` response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartTriageResponse {
    /// Session identifier carried into the chat view.
    pub session_id: String,
    /// Row id of the created patient record, when included.
    #[serde(default)]
    pub patient_id: Option<i64>,
    /// Optional greeting line from the triage assistant.
    #[serde(default)]
    pub message: Option<String>,
}

/// Accept an integer from a JSON number or a numeric string.
#[allow(clippy::cast_possible_truncation)]
fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| D::Error::custom("expected an integer value")),
        serde_json::Value::String(s) => s.trim().parse::<i64>().map_err(D::Error::custom),
        other => Err(D::Error::custom(format!(
            "expected a number or numeric string, got {other}"
        ))),
    }
}
