//! Authenticated transport to the VerticalResponse API.
//!
//! [`HttpClient`] attaches the bearer token and user agent to every call
//! and retries 429 and 500 replies while attempts remain.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError, RetriesExhaustedError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::VrConfig;

/// Seconds to wait before retrying when the reply names no usable wait.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends [`HttpRequest`]s to the configured host.
///
/// `HttpClient` is `Send + Sync` and can be shared across tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Host without a trailing slash (e.g., `https://vrapi.verticalresponse.com`).
    base_uri: String,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Builds a client for the host and token in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be initialised.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verticalresponse_api::{VrConfig, AccessToken};
    /// use verticalresponse_api::clients::HttpClient;
    ///
    /// let config = VrConfig::builder()
    ///     .access_token(AccessToken::new("token").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config).unwrap();
    /// assert_eq!(client.base_uri(), "https://vrapi.verticalresponse.com");
    /// ```
    pub fn new(config: &VrConfig) -> Result<Self, HttpError> {
        let user_agent = config.user_agent_prefix().map_or_else(
            || format!("VerticalResponse API Library v{SDK_VERSION} | Rust {RUST_VERSION}"),
            |prefix| {
                format!("{prefix} | VerticalResponse API Library v{SDK_VERSION} | Rust {RUST_VERSION}")
            },
        );

        let default_headers = HashMap::from([
            ("User-Agent".to_string(), user_agent),
            ("Accept".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", config.access_token().as_ref()),
            ),
        ]);

        Ok(Self {
            client: reqwest::Client::builder().use_rustls_tls().build()?,
            base_uri: config.host().as_ref().to_string(),
            default_headers,
        })
    }

    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends `request`, retrying 429 and 500 replies up to `request.tries`
    /// attempts in total.
    ///
    /// A 429 waits for its `Retry-After` when that holds a usable number of
    /// seconds; every other retry waits [`RETRY_WAIT_TIME`].
    ///
    /// # Errors
    ///
    /// - [`HttpError::Network`] when no reply arrives
    /// - [`HttpError::RetriesExhausted`] when retries were allowed and ran out
    /// - [`HttpError::Response`] for any other non-2xx reply
    pub async fn request(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = format!("{}/{}", self.base_uri, request.path);
        let attempts = request.tries.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                attempt,
                "Sending VerticalResponse API request"
            );

            let response = self.send_once(request, &url).await?;
            if response.is_ok() {
                return Ok(response);
            }

            let retryable = matches!(response.code, 429 | 500);
            if !retryable || attempt >= attempts {
                return Err(failure(&response, attempt, retryable && attempts > 1));
            }

            let delay = retry_delay(&response);
            tracing::warn!(
                path = %request.path,
                status = response.code,
                attempt,
                "Retrying VerticalResponse API request in {:?}",
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once(&self, request: &HttpRequest, url: &str) -> Result<HttpResponse, HttpError> {
        let mut builder = self.client.request(request.method.into(), url);
        for (name, value) in &self.default_headers {
            builder = builder.header(name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let reply = builder.send().await?;
        let code = reply.status().as_u16();
        let headers = collect_headers(reply.headers());
        let text = reply.text().await.unwrap_or_default();

        Ok(HttpResponse::new(code, headers, parse_body(code, &text)))
    }
}

const RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");

fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut collected: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        collected
            .entry(name.as_str().to_ascii_lowercase())
            .or_default()
            .push(value.to_str().unwrap_or_default().to_string());
    }
    collected
}

/// Empty bodies become `{}`. Unparseable 5xx bodies are kept as `raw_body`.
fn parse_body(code: u16, text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| {
        if code >= 500 {
            serde_json::json!({ "raw_body": text })
        } else {
            Value::Object(serde_json::Map::new())
        }
    })
}

fn retry_delay(response: &HttpResponse) -> Duration {
    match (response.code, response.retry_after) {
        (429, Some(delay)) => delay,
        _ => Duration::from_secs(RETRY_WAIT_TIME),
    }
}

fn failure(response: &HttpResponse, attempts: u32, exhausted: bool) -> HttpError {
    let message = response.error_message();
    let request_id = response.request_id().map(String::from);

    if exhausted {
        RetriesExhaustedError {
            code: response.code,
            attempts,
            message,
            request_id,
        }
        .into()
    } else {
        HttpResponseError {
            code: response.code,
            message,
            request_id,
        }
        .into()
    }
}
