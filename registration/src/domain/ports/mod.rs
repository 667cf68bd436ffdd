//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod profile_cache;
mod registration_api;

#[cfg(test)]
pub use profile_cache::MockCurrentUserProfileCache;
pub use profile_cache::CurrentUserProfileCache;
#[cfg(test)]
pub use registration_api::MockRegistrationApi;
pub use registration_api::{
    CandidateLookup, CandidateProfileUpdate, CreateCandidateRequest, RegisterUserRequest,
    RegistrationApi, RemoteApiError,
};
