//! Clock access and timestamp formatting for the UI.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use chrono::NaiveDateTime;

/// Current wall-clock time in milliseconds since the epoch.
///
/// Outside the browser there is no clock source wired up; views only run
/// hydrated, so the zero fallback is never rendered.
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

/// Short `HH:MM` stamp for a chat bubble, in the viewer's local time.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn clock_time(ms: f64) -> String {
    #[cfg(feature = "hydrate")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ms));
        format!("{:02}:{:02}", date.get_hours(), date.get_minutes())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        chrono::DateTime::from_timestamp_millis(ms as i64)
            .map_or_else(|| "--:--".to_owned(), |dt| dt.format("%H:%M").to_string())
    }
}

/// `HH:MM` arrival stamp for a queue row.
#[must_use]
pub fn entry_time(created_at: &NaiveDateTime) -> String {
    created_at.format("%H:%M").to_string()
}

/// Full `YYYY-MM-DD HH:MM` stamp for the patient detail view.
#[must_use]
pub fn entry_timestamp(created_at: &NaiveDateTime) -> String {
    created_at.format("%Y-%m-%d %H:%M").to_string()
}
