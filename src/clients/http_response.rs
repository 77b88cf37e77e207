//! Replies from the VerticalResponse API, before any resource mapping.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

/// Status, headers and JSON body of one API reply.
///
/// Header names are stored lower-cased. An empty body is stored as `{}`.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub code: u16,
    pub headers: HashMap<String, Vec<String>>,
    pub body: Value,
    /// Wait requested by a `Retry-After` header, when it holds a usable
    /// number of seconds.
    pub retry_after: Option<Duration>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        let retry_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| parse_retry_after(value));

        Self {
            code,
            headers,
            body,
            retry_after,
        }
    }

    /// First value of the named header; the lookup ignores case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.code, 200..=299)
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Human-readable reason for a failed reply.
    #[must_use]
    pub fn error_message(&self) -> String {
        error_message(&self.body)
    }
}

/// Prefers the service's `error.message`; falls back to the whole body.
pub(crate) fn error_message(body: &Value) -> String {
    if let Some(message) = body.pointer("/error/message").and_then(Value::as_str) {
        return message.to_string();
    }
    match body {
        Value::Object(map) if map.is_empty() => "no error details returned".to_string(),
        other => other.to_string(),
    }
}

/// Negative, non-finite and out-of-range values yield `None`.
fn parse_retry_after(value: &str) -> Option<Duration> {
    let seconds = value.trim().parse::<f64>().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}
