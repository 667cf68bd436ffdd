//! Bearer credential attached to every remote API call.

use std::fmt;

use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroizing;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Validation errors returned by [`BearerToken::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerTokenError {
    /// The token was empty or only whitespace.
    #[error("bearer token must not be empty")]
    Empty,
    /// The token contained whitespace and cannot be sent as a header.
    #[error("bearer token must not contain whitespace")]
    ContainsWhitespace,
}

/// Session credential issued by the identity provider.
///
/// The secret is zeroised on drop and never rendered by `Debug`. The caller
/// is responsible for keeping it current; nothing here refreshes it.
#[derive(Clone)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Validate and wrap a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`BearerTokenError`] when the token is blank or contains
    /// whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, BearerTokenError> {
        let secret = Zeroizing::new(raw.into());
        if secret.is_empty() {
            return Err(BearerTokenError::Empty);
        }
        if secret.chars().any(char::is_whitespace) {
            return Err(BearerTokenError::ContainsWhitespace);
        }
        Ok(Self(secret))
    }

    /// Borrow the raw secret for an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Truncated SHA-256 fingerprint identifying the session without the
    /// secret itself. Safe to log and to use as a cache key.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken")
            .field(&self.fingerprint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", BearerTokenError::Empty)]
    #[case("abc def", BearerTokenError::ContainsWhitespace)]
    #[case(" abc", BearerTokenError::ContainsWhitespace)]
    fn rejects_malformed_tokens(#[case] raw: &str, #[case] expected: BearerTokenError) {
        let error = BearerToken::new(raw).expect_err("token should be rejected");
        assert_eq!(error, expected);
    }

    #[rstest]
    fn fingerprint_is_stable_hex_of_fixed_length() {
        let token = BearerToken::new("sess_2abcXYZ").expect("token");

        let fp = token.fingerprint();

        assert_eq!(fp, token.fingerprint(), "fingerprint should be deterministic");
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[rstest]
    fn distinct_tokens_have_distinct_fingerprints() {
        let first = BearerToken::new("sess_one").expect("token");
        let second = BearerToken::new("sess_two").expect("token");
        assert_ne!(first.fingerprint(), second.fingerprint());
    }

    #[rstest]
    fn debug_output_hides_the_secret() {
        let token = BearerToken::new("super-secret-token").expect("token");
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.starts_with("BearerToken("));
    }
}
