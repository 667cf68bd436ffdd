//! Reqwest-backed adapters for the users and candidates REST API.

mod client;
mod dto;
mod registration_api;

pub use client::ApiClient;
pub use registration_api::HttpRegistrationApi;
