use super::*;

fn entry_json() -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "name": "Maya Chen",
        "age": 34,
        "created_at": "2026-08-23T14:03:05.123456",
        "status": "waiting",
        "summary": "Chest pain, onset 2h ago",
        "session_id": "sess-7",
        "urgency_level": "High"
    })
}

// =============================================================
// TriageEntry parsing
// =============================================================

#[test]
fn triage_entry_parses_full_row() {
    let entry: TriageEntry = serde_json::from_value(entry_json()).expect("entry");
    assert_eq!(entry.id, 7);
    assert_eq!(entry.name, "Maya Chen");
    assert_eq!(entry.age, 34);
    assert_eq!(entry.status, "waiting");
    assert_eq!(entry.summary.as_deref(), Some("Chest pain, onset 2h ago"));
    assert_eq!(entry.session_id, "sess-7");
    assert_eq!(entry.urgency_level.as_deref(), Some("High"));
}

#[test]
fn triage_entry_parses_created_at_without_fraction() {
    let mut json = entry_json();
    json["created_at"] = serde_json::json!("2026-08-23T14:03:05");
    let entry: TriageEntry = serde_json::from_value(json).expect("entry");
    assert_eq!(
        entry.created_at,
        "2026-08-23T14:03:05".parse::<chrono::NaiveDateTime>().expect("ts")
    );
}

#[test]
fn triage_entry_tolerates_missing_summary_and_urgency() {
    let mut json = entry_json();
    json.as_object_mut().expect("object").remove("summary");
    json.as_object_mut().expect("object").remove("urgency_level");
    let entry: TriageEntry = serde_json::from_value(json).expect("entry");
    assert_eq!(entry.summary, None);
    assert_eq!(entry.urgency_level, None);
}

#[test]
fn triage_entry_accepts_numeric_string_age() {
    let mut json = entry_json();
    json["age"] = serde_json::json!("34");
    let entry: TriageEntry = serde_json::from_value(json).expect("entry");
    assert_eq!(entry.age, 34);
}

#[test]
fn triage_entry_rejects_non_numeric_age() {
    let mut json = entry_json();
    json["age"] = serde_json::json!("old");
    let result: Result<TriageEntry, _> = serde_json::from_value(json);
    assert!(result.is_err());
}

#[test]
fn patients_response_parses_list() {
    let body = serde_json::json!({ "patients": [entry_json()] });
    let parsed: PatientsResponse = serde_json::from_value(body).expect("response");
    assert_eq!(parsed.patients.len(), 1);
}

// =============================================================
// Auth payloads
// =============================================================

#[test]
fn login_response_parses_token_and_user() {
    let body = serde_json::json!({
        "token": "tok-1",
        "user": { "id": 1, "email": "doc@example.com", "name": "Dr. Osei", "is_doctor": true }
    });
    let parsed: LoginResponse = serde_json::from_value(body).expect("response");
    assert_eq!(parsed.token, "tok-1");
    assert!(parsed.user.is_doctor);
}

#[test]
fn user_is_doctor_defaults_to_false() {
    let body = serde_json::json!({ "id": 2, "email": "p@example.com", "name": "Pat" });
    let parsed: User = serde_json::from_value(body).expect("user");
    assert!(!parsed.is_doctor);
}

#[test]
fn me_response_unwraps_user_envelope() {
    let body = serde_json::json!({
        "user": { "id": 3, "email": "doc@example.com", "name": "Dr. Vale", "is_doctor": true }
    });
    let parsed: MeResponse = serde_json::from_value(body).expect("response");
    assert_eq!(parsed.user.name, "Dr. Vale");
}

// =============================================================
// Start-triage payload
// =============================================================

#[test]
fn start_triage_response_parses_session_id() {
    let body = serde_json::json!({ "session_id": "abc", "patient_id": 9, "message": "Hello" });
    let parsed: StartTriageResponse = serde_json::from_value(body).expect("response");
    assert_eq!(parsed.session_id, "abc");
    assert_eq!(parsed.patient_id, Some(9));
    assert_eq!(parsed.message.as_deref(), Some("Hello"));
}

#[test]
fn start_triage_response_tolerates_minimal_body() {
    let body = serde_json::json!({ "session_id": "abc" });
    let parsed: StartTriageResponse = serde_json::from_value(body).expect("response");
    assert_eq!(parsed.patient_id, None);
    assert_eq!(parsed.message, None);
}
