//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetches, socket room
//! membership, redirects) and delegates rendering details to `components`.

pub mod chat;
pub mod dashboard;
pub mod home;
pub mod login;
