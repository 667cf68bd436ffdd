//! Domain model and services for sign-up reconciliation.
//!
//! The domain owns the user and candidate entities, the registration input,
//! and the services that drive the remote API through [`ports`].

mod candidate;
mod candidate_profile;
mod duplicate;
mod fetch_outcome;
pub mod ports;
mod reconciliation;
mod registration;
mod token;
mod user;

pub use self::candidate::Candidate;
pub use self::candidate_profile::{CandidateProfileService, ProfileUpdateError};
pub use self::duplicate::{
    DUPLICATE_DETAIL_PATTERN, DUPLICATE_MESSAGE_PATTERNS, is_duplicate_error,
};
pub use self::fetch_outcome::FetchOutcome;
pub use self::reconciliation::{ReconciliationResult, RegistrationReconciler};
pub use self::registration::{RegistrationData, RegistrationValidationError};
pub use self::token::{BearerToken, BearerTokenError};
pub use self::user::User;
