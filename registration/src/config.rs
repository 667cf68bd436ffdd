//! Remote API settings loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const MIN_TIMEOUT_SECONDS: u64 = 1;

/// Errors raised while interpreting [`ReconcilerSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `base_url` was not configured.
    #[error("SPLITS_API_BASE_URL must be set")]
    MissingBaseUrl,
    /// `base_url` is not an absolute HTTP(S) URL.
    #[error("invalid API base URL {value:?}: {reason}")]
    InvalidBaseUrl {
        /// The configured value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Configuration for the remote API client and profile cache.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SPLITS_API")]
pub struct ReconcilerSettings {
    /// Root of the REST API, e.g. `https://api.splits.network/v1`.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 10)]
    pub timeout_seconds: u64,
    /// Lifetime of cached profiles; unset means entries never expire.
    pub profile_cache_ttl_seconds: Option<u64>,
}

impl ReconcilerSettings {
    /// Parse the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the URL is missing, relative, or not
    /// HTTP(S).
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SettingsError::MissingBaseUrl)?;
        let url = Url::parse(raw).map_err(|error| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            reason: error.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(SettingsError::InvalidBaseUrl {
                value: raw.to_owned(),
                reason: format!("unsupported scheme {scheme}"),
            }),
        }
    }

    /// Request timeout, never shorter than one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(MIN_TIMEOUT_SECONDS))
    }

    /// Profile cache TTL, if configured.
    pub fn profile_cache_ttl(&self) -> Option<Duration> {
        self.profile_cache_ttl_seconds.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for remote API configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 3] = [
        "SPLITS_API_BASE_URL",
        "SPLITS_API_TIMEOUT_SECONDS",
        "SPLITS_API_PROFILE_CACHE_TTL_SECONDS",
    ];

    fn load_from_empty_args() -> ReconcilerSettings {
        ReconcilerSettings::load_from_iter([OsString::from("ensure-registration")])
            .expect("config should load")
    }

    fn settings(base_url: Option<&str>, timeout_seconds: u64) -> ReconcilerSettings {
        ReconcilerSettings {
            base_url: base_url.map(str::to_owned),
            timeout_seconds,
            profile_cache_ttl_seconds: None,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let loaded = load_from_empty_args();

        assert_eq!(loaded.timeout(), Duration::from_secs(10));
        assert!(loaded.profile_cache_ttl().is_none());
        assert_eq!(loaded.base_url(), Err(SettingsError::MissingBaseUrl));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SPLITS_API_BASE_URL", Some("https://api.splits.test/v1".to_owned())),
            ("SPLITS_API_TIMEOUT_SECONDS", Some("3".to_owned())),
            ("SPLITS_API_PROFILE_CACHE_TTL_SECONDS", Some("60".to_owned())),
        ]);

        let loaded = load_from_empty_args();

        assert_eq!(
            loaded.base_url().map(String::from).as_deref(),
            Ok("https://api.splits.test/v1")
        );
        assert_eq!(loaded.timeout(), Duration::from_secs(3));
        assert_eq!(loaded.profile_cache_ttl(), Some(Duration::from_secs(60)));
    }

    #[rstest]
    fn zero_timeout_is_raised_to_the_minimum() {
        assert_eq!(settings(None, 0).timeout(), Duration::from_secs(1));
    }

    #[rstest]
    #[case::blank("   ")]
    #[case::relative("/v1")]
    #[case::wrong_scheme("ftp://api.splits.test")]
    fn rejects_unusable_base_urls(#[case] raw: &str) {
        let error = settings(Some(raw), 10).base_url().expect_err("URL should be rejected");
        assert!(matches!(
            error,
            SettingsError::MissingBaseUrl | SettingsError::InvalidBaseUrl { .. }
        ));
    }
}
