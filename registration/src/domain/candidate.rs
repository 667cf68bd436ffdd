//! Candidate record owned by the remote store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recruiting candidate profile attached to exactly one user.
///
/// ## Invariants
/// - At most one candidate exists per `user_id`; the remote store enforces
///   this with a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Store-assigned identifier.
    pub id: String,
    /// Owning user id.
    pub user_id: String,
    /// Contact email.
    pub email: String,
    /// Name shown on the profile.
    pub full_name: String,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-form location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// LinkedIn profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// Creation time assigned by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time assigned by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Candidate {
    /// Build a candidate with only the fields every record carries.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            email: email.into(),
            full_name: full_name.into(),
            phone: None,
            location: None,
            linkedin_url: None,
            created_at: None,
            updated_at: None,
        }
    }
}
