//! Authenticated JSON client for the remote API.
//!
//! This client owns transport details only: URL building, bearer auth,
//! timeout and HTTP error mapping, and envelope decoding.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{EnvelopeDto, ErrorBodyDto};
use crate::domain::BearerToken;
use crate::domain::ports::RemoteApiError;

/// JSON client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let client = ApiClient::new(base_url, Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// `GET` the resource at `path` with query `params`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] for non-success statuses, transport
    /// failures, and undecodable bodies.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &[&str],
        params: &[(&str, &str)],
        token: &BearerToken,
    ) -> Result<T, RemoteApiError> {
        let request = self.request(Method::GET, path, token)?.query(params);
        send(request).await
    }

    /// `POST` `body` to `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn post_json<B, T>(
        &self,
        path: &[&str],
        body: &B,
        token: &BearerToken,
    ) -> Result<T, RemoteApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, token)?.json(body);
        send(request).await
    }

    /// `PATCH` `body` to `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn patch_json<B, T>(
        &self,
        path: &[&str],
        body: &B,
        token: &BearerToken,
    ) -> Result<T, RemoteApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, path, token)?.json(body);
        send(request).await
    }

    fn request(
        &self,
        method: Method,
        path: &[&str],
        token: &BearerToken,
    ) -> Result<RequestBuilder, RemoteApiError> {
        let url = endpoint(&self.base_url, path)?;
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(token.expose())
            .header(reqwest::header::ACCEPT, "application/json"))
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, RemoteApiError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    debug!(status = status.as_u16(), path = response.url().path(), "api response");

    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    decode_body(body.as_ref())
}

fn endpoint(base_url: &Url, path: &[&str]) -> Result<Url, RemoteApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| RemoteApiError::invalid_request("API base URL cannot carry a path"))?
        .pop_if_empty()
        .extend(path);
    Ok(url)
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, RemoteApiError> {
    serde_json::from_slice::<EnvelopeDto<T>>(body)
        .map(EnvelopeDto::into_inner)
        .map_err(|error| RemoteApiError::decode(format!("invalid API response payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> RemoteApiError {
    if error.is_timeout() {
        RemoteApiError::timeout(error.to_string())
    } else if error.is_decode() {
        RemoteApiError::decode(error.to_string())
    } else {
        RemoteApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteApiError {
    let parsed = serde_json::from_slice::<ErrorBodyDto>(body).unwrap_or_default();
    let message = parsed.message().map_or_else(
        || format!("Request failed with status code {}", status.as_u16()),
        str::to_owned,
    );
    RemoteApiError::status(status.as_u16(), message, parsed.detail().map(str::to_owned))
}
