//! Classification of "record already exists" failures.
//!
//! The remote API does not report uniqueness violations consistently: some
//! endpoints answer 409, others surface the database message in a 400 or 500
//! body. Every create path shares this one predicate.

use crate::domain::ports::RemoteApiError;

const CONFLICT: u16 = 409;

/// Lower-case fragments of the error message that indicate a duplicate.
pub const DUPLICATE_MESSAGE_PATTERNS: [&str; 4] = [
    "already registered",
    "already exists",
    "duplicate",
    "unique constraint",
];

/// Lower-case fragment of the nested `error.message` body field that
/// indicates a duplicate.
pub const DUPLICATE_DETAIL_PATTERN: &str = "duplicate";

/// Whether `error` means another actor already created the record.
pub fn is_duplicate_error(error: &RemoteApiError) -> bool {
    if error.status_code() == Some(CONFLICT) {
        return true;
    }

    let message = error.message().to_lowercase();
    if DUPLICATE_MESSAGE_PATTERNS
        .iter()
        .any(|pattern| message.contains(*pattern))
    {
        return true;
    }

    error
        .detail()
        .is_some_and(|detail| detail.to_lowercase().contains(DUPLICATE_DETAIL_PATTERN))
}
