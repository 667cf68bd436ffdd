//! Partial updates to the caller's candidate profile.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{
    CandidateLookup, CandidateProfileUpdate, RegistrationApi, RemoteApiError,
};
use crate::domain::{BearerToken, Candidate, FetchOutcome};

/// Errors returned by [`CandidateProfileService::update_profile`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileUpdateError {
    /// No field was supplied.
    #[error("profile update must change at least one field")]
    EmptyUpdate,
    /// A full name was supplied but it is blank.
    #[error("full name must not be blank")]
    BlankFullName,
    /// The caller has no candidate profile to update.
    #[error("no candidate profile exists for the current user")]
    CandidateMissing,
    /// The remote API rejected the read or the update.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),
}

/// Edits the candidate profile owned by the caller's session.
pub struct CandidateProfileService<A> {
    api: Arc<A>,
}

impl<A> Clone for CandidateProfileService<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A> CandidateProfileService<A> {
    /// Create a service over the given API port.
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A: RegistrationApi> CandidateProfileService<A> {
    /// Apply `update` to the caller's candidate profile.
    ///
    /// The update is validated before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileUpdateError::EmptyUpdate`] or
    /// [`ProfileUpdateError::BlankFullName`] for invalid input,
    /// [`ProfileUpdateError::CandidateMissing`] when the caller has no
    /// candidate, and [`ProfileUpdateError::Remote`] when the API fails.
    pub async fn update_profile(
        &self,
        token: &BearerToken,
        update: CandidateProfileUpdate,
    ) -> Result<Candidate, ProfileUpdateError> {
        if update.is_empty() {
            return Err(ProfileUpdateError::EmptyUpdate);
        }
        if update
            .full_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ProfileUpdateError::BlankFullName);
        }

        let lookup = self.api.find_candidate(token, CandidateLookup::Current).await;
        let current = match FetchOutcome::from_lookup(lookup) {
            FetchOutcome::Found(candidate) => candidate,
            FetchOutcome::NotFound => {
                debug!("no candidate profile to update");
                return Err(ProfileUpdateError::CandidateMissing);
            }
            FetchOutcome::Failed(error) => return Err(error.into()),
        };

        let updated = self
            .api
            .update_candidate(token, &current.id, &update)
            .await?;
        info!(candidate_id = %updated.id, "updated candidate profile");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRegistrationApi;
    use rstest::{fixture, rstest};

    #[fixture]
    fn token() -> BearerToken {
        BearerToken::new("sess_profile").expect("token")
    }

    fn existing() -> Candidate {
        Candidate::new("candidate-1", "user-1", "ada@example.com", "Ada")
    }

    fn service(api: MockRegistrationApi) -> CandidateProfileService<MockRegistrationApi> {
        CandidateProfileService::new(Arc::new(api))
    }

    #[rstest]
    #[case::empty(CandidateProfileUpdate::default(), ProfileUpdateError::EmptyUpdate)]
    #[case::blank_name(
        CandidateProfileUpdate { full_name: Some("  ".to_owned()), ..Default::default() },
        ProfileUpdateError::BlankFullName
    )]
    #[tokio::test]
    async fn invalid_updates_make_no_requests(
        token: BearerToken,
        #[case] update: CandidateProfileUpdate,
        #[case] expected: ProfileUpdateError,
    ) {
        let mut api = MockRegistrationApi::new();
        api.expect_find_candidate().times(0);
        api.expect_update_candidate().times(0);

        let error = service(api)
            .update_profile(&token, update)
            .await
            .expect_err("update should be rejected");

        assert_eq!(error, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn patches_the_callers_candidate(token: BearerToken) {
        let mut api = MockRegistrationApi::new();
        api.expect_find_candidate()
            .withf(|_, lookup: &CandidateLookup| *lookup == CandidateLookup::Current)
            .times(1)
            .returning(|_, _| Ok(Some(existing())));
        api.expect_update_candidate()
            .withf(|_, id: &str, update: &CandidateProfileUpdate| {
                id == "candidate-1" && update.location.as_deref() == Some("Lisbon")
            })
            .times(1)
            .returning(|_, _, update| {
                let mut candidate = existing();
                candidate.location = update.location.clone();
                Ok(candidate)
            });

        let update = CandidateProfileUpdate {
            location: Some("Lisbon".to_owned()),
            ..Default::default()
        };
        let updated = service(api)
            .update_profile(&token, update)
            .await
            .expect("update succeeds");

        assert_eq!(updated.location.as_deref(), Some("Lisbon"));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_candidate_is_reported(token: BearerToken) {
        let mut api = MockRegistrationApi::new();
        api.expect_find_candidate()
            .times(1)
            .returning(|_, _| Err(RemoteApiError::status(404_u16, "Not Found", None::<String>)));
        api.expect_update_candidate().times(0);

        let update = CandidateProfileUpdate {
            phone: Some("+351 900 000 000".to_owned()),
            ..Default::default()
        };
        let error = service(api)
            .update_profile(&token, update)
            .await
            .expect_err("no candidate to update");

        assert_eq!(error, ProfileUpdateError::CandidateMissing);
    }

    #[rstest]
    #[tokio::test]
    async fn remote_failures_propagate(token: BearerToken) {
        let mut api = MockRegistrationApi::new();
        api.expect_find_candidate()
            .times(1)
            .returning(|_, _| Ok(Some(existing())));
        api.expect_update_candidate()
            .times(1)
            .returning(|_, _, _| {
                Err(RemoteApiError::status(422_u16, "LinkedIn URL is invalid", None::<String>))
            });

        let update = CandidateProfileUpdate {
            linkedin_url: Some("not a url".to_owned()),
            ..Default::default()
        };
        let error = service(api)
            .update_profile(&token, update)
            .await
            .expect_err("update should fail");

        assert_eq!(error.to_string(), "LinkedIn URL is invalid");
    }
}
