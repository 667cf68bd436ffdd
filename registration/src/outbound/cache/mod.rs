//! In-memory adapter for the current-user profile cache.
//!
//! Holds a single entry keyed by the session token fingerprint. A read for a
//! different session, or after the optional TTL lapses, falls through to
//! `GET /users/me`.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{CurrentUserProfileCache, RegistrationApi};
use crate::domain::{BearerToken, FetchOutcome, User};

struct CachedProfile {
    fingerprint: String,
    user: User,
    stored_at: DateTime<Utc>,
}

/// Read-through/write-through cache of the caller's user record.
pub struct InMemoryProfileCache<A> {
    api: Arc<A>,
    clock: Arc<dyn Clock>,
    ttl: Option<TimeDelta>,
    entry: Mutex<Option<CachedProfile>>,
}

impl<A> InMemoryProfileCache<A> {
    /// Create a cache whose entries never expire.
    pub fn new(api: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            ttl: None,
            entry: Mutex::new(None),
        }
    }

    /// Expire entries `ttl` after they were stored. A TTL too large to
    /// represent disables expiry.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = TimeDelta::from_std(ttl).ok();
        self
    }

    /// Drop the cached entry.
    pub fn clear(&self) {
        *self.lock_entry() = None;
    }

    fn cached(&self, fingerprint: &str) -> Option<User> {
        let now = self.clock.utc();
        let guard = self.lock_entry();
        let entry = guard.as_ref()?;
        if entry.fingerprint != fingerprint {
            return None;
        }
        if self.ttl.is_some_and(|ttl| now - entry.stored_at >= ttl) {
            return None;
        }
        Some(entry.user.clone())
    }

    fn store(&self, fingerprint: String, user: User) {
        let stored_at = self.clock.utc();
        *self.lock_entry() = Some(CachedProfile {
            fingerprint,
            user,
            stored_at,
        });
    }

    fn lock_entry(&self) -> MutexGuard<'_, Option<CachedProfile>> {
        self.entry
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl<A: RegistrationApi> CurrentUserProfileCache for InMemoryProfileCache<A> {
    async fn get(&self, token: &BearerToken) -> FetchOutcome<User> {
        let fingerprint = token.fingerprint();
        if let Some(user) = self.cached(&fingerprint) {
            debug!(session = %fingerprint, "profile cache hit");
            return FetchOutcome::Found(user);
        }

        debug!(session = %fingerprint, "profile cache miss");
        let outcome = FetchOutcome::from_lookup(self.api.fetch_current_user(token).await);
        if let FetchOutcome::Found(user) = &outcome {
            self.store(fingerprint, user.clone());
        }
        outcome
    }

    async fn set(&self, token: &BearerToken, user: User) {
        self.store(token.fingerprint(), user);
    }
}
