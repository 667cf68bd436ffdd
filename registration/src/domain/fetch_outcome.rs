//! Typed result of a remote lookup.

use crate::domain::ports::RemoteApiError;

/// Outcome of reading a resource that may legitimately be absent.
///
/// Absence is a value rather than an error so callers branch by matching
/// instead of inspecting failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// The resource exists.
    Found(T),
    /// The API reported the resource as absent.
    NotFound,
    /// The lookup failed for any other reason.
    Failed(RemoteApiError),
}

impl<T> FetchOutcome<T> {
    /// Classify a port lookup. A 404 error is folded into
    /// [`FetchOutcome::NotFound`].
    pub fn from_lookup(result: Result<Option<T>, RemoteApiError>) -> Self {
        match result {
            Ok(Some(value)) => Self::Found(value),
            Ok(None) => Self::NotFound,
            Err(error) if error.is_not_found() => Self::NotFound,
            Err(error) => Self::Failed(error),
        }
    }

    /// Keep the found value, discarding why it was missing.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound | Self::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn present_value_is_found() {
        let outcome = FetchOutcome::from_lookup(Ok(Some(7)));
        assert_eq!(outcome, FetchOutcome::Found(7));
    }

    #[rstest]
    #[case::empty(Ok(None))]
    #[case::status_404(Err(RemoteApiError::status(404_u16, "Not Found", None::<String>)))]
    fn absence_is_not_found(#[case] result: Result<Option<u8>, RemoteApiError>) {
        assert_eq!(FetchOutcome::from_lookup(result), FetchOutcome::NotFound);
    }

    #[rstest]
    #[case::server_error(RemoteApiError::status(500_u16, "boom", None::<String>))]
    #[case::timeout(RemoteApiError::timeout("deadline elapsed"))]
    fn other_errors_are_failures(#[case] error: RemoteApiError) {
        let outcome = FetchOutcome::<u8>::from_lookup(Err(error.clone()));
        assert_eq!(outcome, FetchOutcome::Failed(error));
    }

    #[rstest]
    fn found_discards_failure_detail() {
        let failed = FetchOutcome::<u8>::Failed(RemoteApiError::transport("reset"));
        assert_eq!(failed.found(), None);
        assert_eq!(FetchOutcome::Found(3).found(), Some(3));
    }
}
