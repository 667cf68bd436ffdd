//! Driven port for the remote REST API that stores users and candidates.
//!
//! The domain owns the request shapes and the error contract so the
//! reconciler can stay transport-agnostic. Adapters translate HTTP statuses,
//! response bodies, and transport failures into [`RemoteApiError`].

use async_trait::async_trait;
use serde::Serialize;

use super::define_port_error;
use crate::domain::{BearerToken, Candidate, RegistrationData, User};

const NOT_FOUND: u16 = 404;

define_port_error! {
    /// Errors surfaced while calling the remote API.
    ///
    /// `Display` yields the bare message so callers can surface it verbatim.
    pub enum RemoteApiError {
        /// The API answered with a non-success status.
        Status { status: u16, message: String, detail: Option<String> } => "{message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } => "{message}",
        /// The request exceeded the client timeout.
        Timeout { message: String } => "{message}",
        /// The response body could not be decoded.
        Decode { message: String } => "{message}",
        /// The adapter refused to build the request.
        InvalidRequest { message: String } => "{message}",
    }
}

impl RemoteApiError {
    /// HTTP status carried by the error, when the API responded at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. }
            | Self::Transport { message }
            | Self::Timeout { message }
            | Self::Decode { message }
            | Self::InvalidRequest { message } => message,
        }
    }

    /// Nested error message reported in the response body, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether the API reported the resource as absent.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(NOT_FOUND)
    }
}

/// Body for `POST /users/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterUserRequest {
    /// Identity-provider user id.
    pub external_id: String,
    /// Primary email address.
    pub email: String,
    /// Display name, when the identity provider knows one.
    pub name: Option<String>,
    /// Avatar URL, when the identity provider knows one.
    pub image_url: Option<String>,
}

impl From<&RegistrationData> for RegisterUserRequest {
    fn from(registration: &RegistrationData) -> Self {
        Self {
            external_id: registration.external_id().to_owned(),
            email: registration.email().to_owned(),
            name: registration.name().map(str::to_owned),
            image_url: registration.image_url().map(str::to_owned),
        }
    }
}

/// Body for `POST /candidates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCandidateRequest {
    /// Owning user id.
    pub user_id: String,
    /// Name shown on the candidate profile.
    pub full_name: String,
    /// Contact email.
    pub email: String,
}

/// Partial update sent with `PATCH /candidates/{id}`.
///
/// Only populated fields are serialised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateProfileUpdate {
    /// Replacement full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Replacement phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Replacement location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Replacement LinkedIn profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

impl CandidateProfileUpdate {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.linkedin_url.is_none()
    }
}

/// How to locate a candidate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateLookup {
    /// The candidate owned by the given user id.
    ForUser(String),
    /// The candidate owned by the caller's session.
    Current,
}

/// Port for the user and candidate endpoints of the remote API.
///
/// Lookups return `Ok(None)` when the API reports the resource as absent;
/// every other failure is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// `GET /users/me`.
    async fn fetch_current_user(&self, token: &BearerToken)
    -> Result<Option<User>, RemoteApiError>;

    /// `POST /users/register`.
    async fn register_user(
        &self,
        token: &BearerToken,
        request: &RegisterUserRequest,
    ) -> Result<User, RemoteApiError>;

    /// `GET /candidates?user_id=…` or `GET /candidates/me`.
    async fn find_candidate(
        &self,
        token: &BearerToken,
        lookup: CandidateLookup,
    ) -> Result<Option<Candidate>, RemoteApiError>;

    /// `POST /candidates`.
    async fn create_candidate(
        &self,
        token: &BearerToken,
        request: &CreateCandidateRequest,
    ) -> Result<Candidate, RemoteApiError>;

    /// `PATCH /candidates/{id}`.
    async fn update_candidate(
        &self,
        token: &BearerToken,
        candidate_id: &str,
        update: &CandidateProfileUpdate,
    ) -> Result<Candidate, RemoteApiError>;
}
