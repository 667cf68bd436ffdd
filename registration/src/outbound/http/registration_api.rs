//! [`RegistrationApi`] adapter over [`ApiClient`].

use async_trait::async_trait;

use super::ApiClient;
use crate::domain::ports::{
    CandidateLookup, CandidateProfileUpdate, CreateCandidateRequest, RegisterUserRequest,
    RegistrationApi, RemoteApiError,
};
use crate::domain::{BearerToken, Candidate, User};

const USERS: &str = "users";
const CANDIDATES: &str = "candidates";
const CURRENT: &str = "me";

/// HTTP implementation of the users and candidates port.
#[derive(Debug, Clone)]
pub struct HttpRegistrationApi {
    client: ApiClient,
}

impl HttpRegistrationApi {
    /// Wrap a configured client.
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn fetch_current_user(
        &self,
        token: &BearerToken,
    ) -> Result<Option<User>, RemoteApiError> {
        absent_as_none(self.client.get_json(&[USERS, CURRENT], &[], token).await)
    }

    async fn register_user(
        &self,
        token: &BearerToken,
        request: &RegisterUserRequest,
    ) -> Result<User, RemoteApiError> {
        self.client
            .post_json(&[USERS, "register"], request, token)
            .await
    }

    async fn find_candidate(
        &self,
        token: &BearerToken,
        lookup: CandidateLookup,
    ) -> Result<Option<Candidate>, RemoteApiError> {
        match lookup {
            CandidateLookup::ForUser(user_id) => {
                let candidates: Vec<Candidate> = self
                    .client
                    .get_json(&[CANDIDATES], &[("user_id", user_id.as_str())], token)
                    .await?;
                Ok(candidates.into_iter().next())
            }
            CandidateLookup::Current => {
                absent_as_none(self.client.get_json(&[CANDIDATES, CURRENT], &[], token).await)
            }
        }
    }

    async fn create_candidate(
        &self,
        token: &BearerToken,
        request: &CreateCandidateRequest,
    ) -> Result<Candidate, RemoteApiError> {
        self.client.post_json(&[CANDIDATES], request, token).await
    }

    async fn update_candidate(
        &self,
        token: &BearerToken,
        candidate_id: &str,
        update: &CandidateProfileUpdate,
    ) -> Result<Candidate, RemoteApiError> {
        self.client
            .patch_json(&[CANDIDATES, candidate_id], update, token)
            .await
    }
}

fn absent_as_none<T>(result: Result<T, RemoteApiError>) -> Result<Option<T>, RemoteApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_not_found() => Ok(None),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_becomes_none() {
        let result: Result<u8, _> =
            Err(RemoteApiError::status(404_u16, "Not Found", None::<String>));
        assert_eq!(absent_as_none(result), Ok(None));
    }

    #[rstest]
    #[case::server_error(RemoteApiError::status(500_u16, "boom", None::<String>))]
    #[case::unauthorised(RemoteApiError::status(401_u16, "Unauthorized", None::<String>))]
    #[case::transport(RemoteApiError::transport("connection refused"))]
    fn other_failures_are_kept(#[case] error: RemoteApiError) {
        let result: Result<u8, _> = Err(error.clone());
        assert_eq!(absent_as_none(result), Err(error));
    }
}
