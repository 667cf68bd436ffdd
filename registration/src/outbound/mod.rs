//! Outbound adapters for the remote API and the current-user profile cache.

pub mod cache;
pub mod http;
