//! User record owned by the remote store.

use serde::{Deserialize, Serialize};

/// Portal user as returned by the remote API.
///
/// ## Invariants
/// - At most one user exists per `external_id`; the remote store enforces
///   this and reports violations as conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: String,
    /// Identity-provider user id.
    #[serde(default)]
    pub external_id: String,
    /// Primary email address.
    pub email: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
