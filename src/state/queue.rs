//! Triage queue state for the doctor dashboard.
//!
//! Holds the latest patient snapshot plus a refresh sequence so an older
//! in-flight fetch can never overwrite a newer one. Display ordering is
//! urgency first, then arrival time within the same urgency.

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;

use crate::net::types::TriageEntry;

/// Clinical urgency band assigned by the triage assistant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Parse a wire label, case-insensitively. Unknown labels are `None`;
    /// callers treat those as [`Urgency::Medium`] for ordering while still
    /// showing the raw text.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Sort rank, most urgent first.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Rank for an optional wire label; absent or unrecognized ranks as Medium.
#[must_use]
pub fn urgency_rank(label: Option<&str>) -> u8 {
    label
        .and_then(Urgency::parse)
        .unwrap_or(Urgency::Medium)
        .rank()
}

/// Queue entries in display order: urgency descending, then earliest
/// arrival first within the same urgency. The input order breaks any
/// remaining ties (stable sort).
#[must_use]
pub fn sorted_for_display(entries: &[TriageEntry]) -> Vec<TriageEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| (urgency_rank(entry.urgency_level.as_deref()), entry.created_at));
    sorted
}

/// Headline numbers for the dashboard stat cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueCounts {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub waiting: usize,
}

#[must_use]
pub fn queue_counts(entries: &[TriageEntry]) -> QueueCounts {
    let band = |entry: &TriageEntry| entry.urgency_level.as_deref().and_then(Urgency::parse);
    QueueCounts {
        total: entries.len(),
        critical: entries.iter().filter(|e| band(e) == Some(Urgency::Critical)).count(),
        high: entries.iter().filter(|e| band(e) == Some(Urgency::High)).count(),
        waiting: entries.iter().filter(|e| e.status == "waiting").count(),
    }
}

/// Patient queue plus refresh bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct QueueState {
    /// Last applied snapshot, unsorted (views call [`sorted_for_display`]).
    pub entries: Vec<TriageEntry>,
    /// False until the first fetch settles, success or failure.
    pub loaded: bool,
    /// Message from the most recent failed fetch, cleared by a success.
    pub error: Option<String>,
    /// Ticket of the newest refresh; older tickets are discarded on arrival.
    refresh_seq: u64,
}

impl QueueState {
    /// Start a refresh and get its ticket. The current entries stay on
    /// screen until the matching snapshot or failure lands.
    pub fn begin_refresh(&mut self) -> u64 {
        self.refresh_seq += 1;
        self.refresh_seq
    }

    /// Install a fetched snapshot. Returns false (and changes nothing) when
    /// a newer refresh was started after this one.
    pub fn apply_snapshot(&mut self, ticket: u64, entries: Vec<TriageEntry>) -> bool {
        if ticket != self.refresh_seq {
            return false;
        }
        self.entries = entries;
        self.loaded = true;
        self.error = None;
        true
    }

    /// Record a failed fetch, keeping whatever entries were already shown.
    /// Returns false when a newer refresh superseded this one.
    pub fn apply_failure(&mut self, ticket: u64, message: String) -> bool {
        if ticket != self.refresh_seq {
            return false;
        }
        self.loaded = true;
        self.error = Some(message);
        true
    }
}
