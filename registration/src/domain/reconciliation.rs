//! Registration reconciliation: exactly one user and one candidate per
//! identity.
//!
//! Sign-up races with other actors (a second tab, the identity provider's
//! webhook) are expected. The service creates optimistically and falls back
//! to a single re-read when the store reports a duplicate; no locks are held
//! and nothing is stored locally beyond the profile cache write-through.
//!
//! User resolution is mandatory: without a user record the session is
//! unusable, so failures abort. Candidate resolution is best effort: the
//! webhook reconciles a missing candidate later, so failures are logged and
//! the result still reports success.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::domain::ports::{
    CandidateLookup, CreateCandidateRequest, CurrentUserProfileCache, RegisterUserRequest,
    RegistrationApi, RemoteApiError,
};
use crate::domain::{
    BearerToken, Candidate, FetchOutcome, RegistrationData, User, is_duplicate_error,
};

/// Outcome of one reconciliation attempt.
///
/// `error` is present only when `success` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    /// Whether a user record is available.
    pub success: bool,
    /// The resolved user.
    pub user: Option<User>,
    /// The resolved candidate; `None` when candidate resolution failed.
    pub candidate: Option<Candidate>,
    /// Whether the user existed before this attempt.
    pub user_was_existing: bool,
    /// Whether the candidate existed before this attempt.
    pub candidate_was_existing: bool,
    /// Failure message for the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReconciliationResult {
    fn failed(error: &UserResolutionError) -> Self {
        Self {
            success: false,
            user: None,
            candidate: None,
            user_was_existing: false,
            candidate_was_existing: false,
            error: Some(error.to_string()),
        }
    }

    fn resolved(user: Resolved<User>, candidate: Option<Resolved<Candidate>>) -> Self {
        let (candidate, candidate_was_existing) = match candidate {
            Some(resolved) => (Some(resolved.record), resolved.was_existing),
            None => (None, false),
        };
        Self {
            success: true,
            user: Some(user.record),
            candidate,
            user_was_existing: user.was_existing,
            candidate_was_existing,
            error: None,
        }
    }
}

/// Why no user record could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum UserResolutionError {
    /// Registration reported a duplicate but the re-read found nothing.
    #[error("Failed to create or find user account")]
    Unresolvable,
    /// Registration failed for a reason other than a duplicate.
    #[error("{0}")]
    Rejected(RemoteApiError),
}

struct Resolved<T> {
    record: T,
    was_existing: bool,
}

impl<T> Resolved<T> {
    const fn existing(record: T) -> Self {
        Self {
            record,
            was_existing: true,
        }
    }

    const fn created(record: T) -> Self {
        Self {
            record,
            was_existing: false,
        }
    }
}

/// Stateless reconciler over the remote API and the profile cache.
pub struct RegistrationReconciler<A, C> {
    api: Arc<A>,
    cache: Arc<C>,
}

impl<A, C> Clone for RegistrationReconciler<A, C> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<A, C> RegistrationReconciler<A, C> {
    /// Create a reconciler over the given collaborators.
    pub const fn new(api: Arc<A>, cache: Arc<C>) -> Self {
        Self { api, cache }
    }
}

impl<A, C> RegistrationReconciler<A, C>
where
    A: RegistrationApi,
    C: CurrentUserProfileCache,
{
    /// Ensure the caller has a user record and, best effort, a candidate
    /// record.
    ///
    /// Never fails: problems are reported through
    /// [`ReconciliationResult::success`] and [`ReconciliationResult::error`].
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let reconciler = RegistrationReconciler::new(api, cache);
    /// let result = reconciler
    ///     .ensure_user_and_candidate(&token, &registration)
    ///     .await;
    /// if !result.success {
    ///     eprintln!("sign-up blocked: {:?}", result.error);
    /// }
    /// ```
    pub async fn ensure_user_and_candidate(
        &self,
        token: &BearerToken,
        registration: &RegistrationData,
    ) -> ReconciliationResult {
        let span = info_span!(
            "ensure_user_and_candidate",
            attempt_id = %Uuid::new_v4(),
            external_id = registration.external_id()
        );
        self.reconcile(token, registration).instrument(span).await
    }

    /// Return the caller's user, or `None` on any failure.
    pub async fn check_user_exists(&self, token: &BearerToken) -> Option<User> {
        self.cache.get(token).await.found()
    }

    /// Return the caller's candidate, or `None` on any failure.
    pub async fn check_candidate_exists(&self, token: &BearerToken) -> Option<Candidate> {
        let lookup = self.api.find_candidate(token, CandidateLookup::Current).await;
        FetchOutcome::from_lookup(lookup).found()
    }

    async fn reconcile(
        &self,
        token: &BearerToken,
        registration: &RegistrationData,
    ) -> ReconciliationResult {
        let user = match self.resolve_user(token, registration).await {
            Ok(user) => user,
            Err(error) => return ReconciliationResult::failed(&error),
        };
        let candidate = self
            .resolve_candidate(token, registration, &user.record)
            .await;
        ReconciliationResult::resolved(user, candidate)
    }

    async fn resolve_user(
        &self,
        token: &BearerToken,
        registration: &RegistrationData,
    ) -> Result<Resolved<User>, UserResolutionError> {
        match self.cache.get(token).await {
            FetchOutcome::Found(user) => return Ok(Resolved::existing(user)),
            FetchOutcome::NotFound => debug!("no current user; registering"),
            FetchOutcome::Failed(error) => {
                // TODO: decide whether 5xx here should abort instead of registering.
                debug!(error = %error, "current user lookup failed; registering");
            }
        }

        let request = RegisterUserRequest::from(registration);
        match self.api.register_user(token, &request).await {
            Ok(user) => {
                info!(user_id = %user.id, "registered user");
                self.cache.set(token, user.clone()).await;
                Ok(Resolved::created(user))
            }
            Err(error) if is_duplicate_error(&error) => {
                debug!(error = %error, "user already registered; re-reading");
                match self.cache.get(token).await {
                    FetchOutcome::Found(user) => Ok(Resolved::existing(user)),
                    FetchOutcome::NotFound | FetchOutcome::Failed(_) => {
                        warn!(error = %error, "duplicate registration but no user readable");
                        Err(UserResolutionError::Unresolvable)
                    }
                }
            }
            Err(error) => {
                warn!(error = %error, "user registration failed");
                Err(UserResolutionError::Rejected(error))
            }
        }
    }

    async fn resolve_candidate(
        &self,
        token: &BearerToken,
        registration: &RegistrationData,
        user: &User,
    ) -> Option<Resolved<Candidate>> {
        let lookup = CandidateLookup::ForUser(user.id.clone());
        match self.find_candidate(token, lookup.clone()).await {
            FetchOutcome::Found(candidate) => return Some(Resolved::existing(candidate)),
            FetchOutcome::NotFound => debug!(user_id = %user.id, "no candidate; creating"),
            FetchOutcome::Failed(error) => {
                debug!(user_id = %user.id, error = %error, "candidate lookup failed; creating");
            }
        }

        let request = CreateCandidateRequest {
            user_id: user.id.clone(),
            full_name: registration.candidate_full_name(),
            email: registration.email().to_owned(),
        };
        match self.api.create_candidate(token, &request).await {
            Ok(candidate) => {
                info!(user_id = %user.id, candidate_id = %candidate.id, "created candidate");
                Some(Resolved::created(candidate))
            }
            Err(error) if is_duplicate_error(&error) => {
                debug!(user_id = %user.id, error = %error, "candidate already exists; re-reading");
                match self.find_candidate(token, lookup).await {
                    FetchOutcome::Found(candidate) => Some(Resolved::existing(candidate)),
                    FetchOutcome::NotFound | FetchOutcome::Failed(_) => {
                        warn!(
                            user_id = %user.id,
                            error = %error,
                            "duplicate candidate but none readable; leaving for webhook"
                        );
                        None
                    }
                }
            }
            Err(error) => {
                warn!(
                    user_id = %user.id,
                    error = %error,
                    "candidate creation failed; leaving for webhook"
                );
                None
            }
        }
    }

    async fn find_candidate(
        &self,
        token: &BearerToken,
        lookup: CandidateLookup,
    ) -> FetchOutcome<Candidate> {
        FetchOutcome::from_lookup(self.api.find_candidate(token, lookup).await)
    }
}

#[cfg(test)]
#[path = "reconciliation_tests.rs"]
mod tests;
