//! REST client implementation for the VerticalResponse API.
//!
//! This module provides the [`RestClient`] type for making REST API requests
//! with path normalization and retry handling.

use std::collections::HashMap;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::VrConfig;

/// REST API client for the VerticalResponse API.
///
/// Provides `get`, `post`, `put` and `delete` methods taking paths relative
/// to the API host (e.g. `api/v1/messages/emails/42`).
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use verticalresponse_api::{RestClient, VrConfig, AccessToken};
///
/// let config = VrConfig::builder()
///     .access_token(AccessToken::new("token").unwrap())
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let response = client.get("api/v1/lists", None).await?;
/// let body = serde_json::json!({"name": "Newsletter"});
/// let response = client.post("api/v1/lists", Some(body), None).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    tries: u32,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client for the given configuration.
    ///
    /// Requests are attempted once; use [`with_tries`](Self::with_tries)
    /// to enable retries on 429 and 500 responses.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the underlying HTTP client cannot be built.
    pub fn new(config: &VrConfig) -> Result<Self, RestError> {
        let http_client = HttpClient::new(config)?;

        tracing::debug!(host = %config.host().as_ref(), "Created VerticalResponse REST client");

        Ok(Self {
            http_client,
            tries: 1,
        })
    }

    /// Sets how many times each request is attempted.
    #[must_use]
    pub fn with_tries(mut self, tries: u32) -> Self {
        self.tries = tries.max(1);
        self
    }

    /// Returns the number of attempts made per request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the base URI requests are sent to.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        self.http_client.base_uri()
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request to the specified path.
    ///
    /// `body` may be `None` for action endpoints that take no parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, body, query).await
    }

    /// Sends a PUT request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Put, path, Some(body), query)
            .await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, query)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        let request = HttpRequest {
            method,
            path: normalize_path(path)?,
            body,
            query: query.unwrap_or_default(),
            tries: self.tries,
        };

        Ok(self.http_client.request(&request).await?)
    }
}

/// Strips leading and trailing slashes, rejecting paths that end up empty.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(trimmed.to_string())
}
