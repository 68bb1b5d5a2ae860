#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// One-shot hand-off carried from the entry form into the chat view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionHandoff {
    /// Server-issued session identifier.
    pub session_id: String,
    /// Patient display name entered on the form.
    pub patient_name: String,
}

/// In-memory identity of the active triage session.
///
/// Held only in a context signal, never persisted: a direct navigation or a
/// hard refresh lands on an empty state and the chat view redirects to the
/// entry form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Session id, once the entry form handed one off.
    pub session_id: Option<String>,
    /// Patient name, seeded together with the id.
    pub patient_name: Option<String>,
}

/// What the chat view should do given the current session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bootstrap {
    /// Both fields present; the chat view can run.
    Ready {
        session_id: String,
        patient_name: String,
    },
    /// Hand-off absent or incomplete; go back to the entry form.
    RedirectToEntry,
}

impl SessionState {
    /// Store the entry-form hand-off for the session's duration.
    pub fn seed(&mut self, handoff: SessionHandoff) {
        self.session_id = Some(handoff.session_id);
        self.patient_name = Some(handoff.patient_name);
    }

    /// Forget the active session.
    pub fn clear(&mut self) {
        self.session_id = None;
        self.patient_name = None;
    }

    /// Decide whether the chat view is usable.
    ///
    /// The view needs both the session id and the display name; a blank
    /// value counts as missing.
    #[must_use]
    pub fn bootstrap(&self) -> Bootstrap {
        let session_id = self.session_id.as_deref().unwrap_or_default().trim();
        let patient_name = self.patient_name.as_deref().unwrap_or_default().trim();
        if session_id.is_empty() || patient_name.is_empty() {
            return Bootstrap::RedirectToEntry;
        }
        Bootstrap::Ready {
            session_id: session_id.to_owned(),
            patient_name: patient_name.to_owned(),
        }
    }
}
