//! Driven port for the current-user profile cache.
//!
//! The cache serves the caller's own `User` record, either from memory or by
//! fetching it, and accepts write-through updates after registration.

use async_trait::async_trait;

use crate::domain::{BearerToken, FetchOutcome, User};

/// Read-through/write-through cache of the session's current user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserProfileCache: Send + Sync {
    /// Return the cached user or fetch it for the given session.
    async fn get(&self, token: &BearerToken) -> FetchOutcome<User>;

    /// Replace the cached user for the given session.
    async fn set(&self, token: &BearerToken, user: User);
}
