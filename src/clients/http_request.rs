//! Outgoing request description handed to [`HttpClient`](super::HttpClient).

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Verbs the VerticalResponse API answers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// One API call, relative to the configured host.
///
/// A `body` of `None` sends no payload and no `Content-Type`, which is how
/// action endpoints such as `messages/emails/{id}/unschedule` are posted to.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path below the host, without a leading slash (e.g. `api/v1/lists`).
    pub path: String,
    pub body: Option<Value>,
    pub query: HashMap<String, String>,
    /// Attempts allowed for 429 and 500 replies; at least one is always made.
    pub tries: u32,
}
