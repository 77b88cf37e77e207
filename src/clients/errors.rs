//! Transport failures.
//!
//! Every non-2xx reply becomes an [`HttpError`]. A 429 or 500 that is still
//! failing once the client's attempts run out is reported as
//! [`HttpError::RetriesExhausted`]; any other failed reply as
//! [`HttpError::Response`].

use thiserror::Error;

/// The service answered with a non-2xx status.
///
/// ```rust
/// use verticalresponse_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 422,
///     message: "Email has no lists".to_string(),
///     request_id: Some("req-1".to_string()),
/// };
/// assert_eq!(error.to_string(), "VerticalResponse replied 422: Email has no lists");
/// ```
#[derive(Debug, Error)]
#[error("VerticalResponse replied {code}: {message}")]
pub struct HttpResponseError {
    pub code: u16,
    /// The service's `error.message`, or the raw error body.
    pub message: String,
    /// `X-Request-Id` of the failed reply, for support requests.
    pub request_id: Option<String>,
}

/// A 429 or 500 kept coming back until no attempts were left.
#[derive(Debug, Error)]
#[error("Gave up after {attempts} attempts, last reply {code}: {message}")]
pub struct RetriesExhaustedError {
    pub code: u16,
    pub attempts: u32,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    #[error(transparent)]
    RetriesExhausted(#[from] RetriesExhaustedError),

    /// The request never produced a reply (DNS, TLS, connection reset).
    #[error("Could not reach VerticalResponse: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Status of the failed reply, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::RetriesExhausted(e) => Some(e.code),
            Self::Network(_) => None,
        }
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Response(e) => e.request_id.as_deref(),
            Self::RetriesExhausted(e) => e.request_id.as_deref(),
            Self::Network(_) => None,
        }
    }
}
