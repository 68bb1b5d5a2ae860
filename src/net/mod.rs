//! Network layer: REST API calls, realtime socket client, and wire DTOs.

pub mod api;
pub mod socket;
pub mod types;
