//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render from the shared state signals and report interaction
//! through callbacks; none of them talk to the network directly.

pub mod connection_badge;
pub mod patient_card;
pub mod patient_modal;
pub mod queue_stats;
