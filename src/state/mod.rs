//! Application state stores.
//!
//! Each store is a plain struct; the app shell wraps them in `RwSignal`s and
//! provides them via context so views can observe and update them.

pub mod auth;
pub mod chat;
pub mod connection;
pub mod queue;
pub mod session;
