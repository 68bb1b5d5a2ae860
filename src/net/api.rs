//! REST helpers for the triage backend.
//!
//! Browser builds (hydrate) issue real HTTP calls via `gloo-net`; native
//! builds get stubs, since every endpoint here is same-origin browser-only.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics. Server `{error}`
//! bodies are surfaced as the `Err` string so forms can show them inline;
//! transport failures turn into generic status-bearing messages.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "hydrate")]
use super::types::{LoginResponse, MeResponse, PatientsResponse, StartTriageResponse};
#[cfg(not(feature = "hydrate"))]
use super::types::{LoginResponse, StartTriageResponse};
use super::types::{TriageEntry, User};

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header_value(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn start_triage_failed_message(status: u16) -> String {
    format!("start triage request failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn login_failed_message(status: u16) -> String {
    format!("login request failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn patients_failed_message(status: u16) -> String {
    format!("patients request failed: {status}")
}

/// True when a request-failed message carries an auth-rejection status.
///
/// The dashboard uses this to drop a stale token and send the user back to
/// the login view instead of silently keeping an unusable session.
pub fn is_auth_failure(message: &str) -> bool {
    message.ends_with(": 401")
}

/// Pull the inline `error` text out of a server response body, if present.
#[cfg(any(test, feature = "hydrate"))]
fn error_from_body(body: &serde_json::Value) -> Option<String> {
    body.get("error")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}

/// Open a triage session via `POST /api/start_triage`.
///
/// # Errors
///
/// Returns the server's inline `error` text when it sent one, otherwise a
/// generic message carrying the HTTP status or transport failure.
pub async fn start_triage(name: &str, age: i64) -> Result<StartTriageResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name, "age": age });
        let resp = gloo_net::http::Request::post("/api/start_triage")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let body = resp.json::<serde_json::Value>().await.ok();
        if let Some(message) = body.as_ref().and_then(error_from_body) {
            return Err(message);
        }
        if !resp.ok() {
            return Err(start_triage_failed_message(resp.status()));
        }
        let Some(body) = body else {
            return Err("malformed start triage response".to_owned());
        };
        serde_json::from_value::<StartTriageResponse>(body).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, age);
        Err("not available outside the browser".to_owned())
    }
}

/// Sign a doctor in via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns the server's inline `error` text (bad credentials) when present,
/// otherwise a generic status-bearing message.
pub async fn login(email: &str, password: &str) -> Result<LoginResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email, "password": password });
        let resp = gloo_net::http::Request::post("/api/auth/login")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let body = resp.json::<serde_json::Value>().await.ok();
        if let Some(message) = body.as_ref().and_then(error_from_body) {
            return Err(message);
        }
        if !resp.ok() {
            return Err(login_failed_message(resp.status()));
        }
        let Some(body) = body else {
            return Err("malformed login response".to_owned());
        };
        serde_json::from_value::<LoginResponse>(body).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available outside the browser".to_owned())
    }
}

/// Validate a stored bearer token against `GET /api/auth/me`.
///
/// Returns `None` when the token is rejected or the call fails; the caller
/// should treat that as a signed-out state.
pub async fn fetch_current_user(token: &str) -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .header("Authorization", &bearer_header_value(token))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<MeResponse>().await.ok().map(|me| me.user)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        None
    }
}

/// Fetch the full patient queue snapshot via `GET /api/doctor/patients`.
///
/// # Errors
///
/// Returns a status-bearing message on rejection or transport failure; the
/// caller keeps its previous snapshot in that case.
pub async fn fetch_patients(token: &str) -> Result<Vec<TriageEntry>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/doctor/patients")
            .header("Authorization", &bearer_header_value(token))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(patients_failed_message(resp.status()));
        }
        let body: PatientsResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.patients)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err("not available outside the browser".to_owned())
    }
}
