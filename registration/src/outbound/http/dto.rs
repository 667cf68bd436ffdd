//! DTOs for decoding API response bodies.
//!
//! Success payloads arrive either bare or wrapped in a `data` envelope; error
//! payloads carry the message at the top level or under `error`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum EnvelopeDto<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> EnvelopeDto<T> {
    pub(super) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<ErrorFieldDto>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorFieldDto {
    Nested {
        #[serde(default)]
        message: Option<String>,
    },
    Text(String),
}

impl ErrorBodyDto {
    /// Nested `error.message`, when present.
    pub(super) fn detail(&self) -> Option<&str> {
        match self.error.as_ref() {
            Some(ErrorFieldDto::Nested { message }) => message.as_deref(),
            Some(ErrorFieldDto::Text(_)) | None => None,
        }
    }

    /// First available message: `message`, then `error.message`, then a
    /// plain-string `error`.
    pub(super) fn message(&self) -> Option<&str> {
        self.message.as_deref().or_else(|| self.detail()).or_else(|| {
            match self.error.as_ref() {
                Some(ErrorFieldDto::Text(text)) => Some(text.as_str()),
                Some(ErrorFieldDto::Nested { .. }) | None => None,
            }
        })
    }
}
