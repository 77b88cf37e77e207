//! Resource-specific error types for REST API operations.
//!
//! This module contains error types for REST resource operations, extending
//! the base [`RestError`](crate::clients::RestError) with resource-specific
//! semantics like `NotFound` and `InvalidListReference`.
//!
//! # Error Handling
//!
//! HTTP status codes are mapped to semantic error variants:
//!
//! - **404**: [`ResourceError::NotFound`] - Resource doesn't exist
//! - **Other 4xx/5xx and network failures**: [`ResourceError::Http`]
//! - **Empty request path**: [`ResourceError::Rest`]
//!
//! # Example
//!
//! ```rust,ignore
//! use verticalresponse_api::rest::{ResourceError, RestResource};
//! use verticalresponse_api::rest::resources::v1::Email;
//!
//! match Email::find(&client, 42).await {
//!     Ok(email) => println!("Found email {}", email.id),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{} with id {} not found", resource, id);
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use crate::clients::{error_message, HttpError, HttpResponseError, RestError};
use thiserror::Error;

/// Error type for REST resource operations.
///
/// # Example
///
/// ```rust
/// use verticalresponse_api::rest::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "Email",
///     id: "42".to_string(),
/// };
/// assert!(error.to_string().contains("Email"));
/// assert!(error.to_string().contains("42"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Email", "List").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
    },

    /// A list reference passed to a launch could not be resolved to a list id.
    ///
    /// Accepted references are list objects, objects carrying an `id`,
    /// unsigned integers, and strings holding an unsigned integer.
    #[error("Cannot resolve list id from {value}")]
    InvalidListReference {
        /// The JSON rendering of the offending value.
        value: String,
    },

    /// An instance operation was attempted on a resource without an id.
    #[error("{resource}::{operation} requires a resource id")]
    MissingId {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "update", "delete").
        operation: &'static str,
    },

    /// The response body could not be mapped onto the resource type.
    #[error("Failed to deserialize {resource}: {source}")]
    Deserialization {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The service rejected the request or could not be reached.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The request could not be formed.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Creates a `ResourceError` from an HTTP response status code.
    ///
    /// Maps HTTP status codes to semantic error variants:
    /// - 404 -> `NotFound`
    /// - Other -> `Http`
    ///
    /// # Example
    ///
    /// ```rust
    /// use verticalresponse_api::rest::ResourceError;
    /// use serde_json::json;
    ///
    /// let error = ResourceError::from_http_response(
    ///     404,
    ///     &json!({"error": {"code": 404, "message": "Not found"}}),
    ///     "Email",
    ///     Some("42"),
    ///     Some("req-123"),
    /// );
    /// assert!(matches!(error, ResourceError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_http_response(
        code: u16,
        body: &serde_json::Value,
        resource: &'static str,
        id: Option<&str>,
        request_id: Option<&str>,
    ) -> Self {
        match code {
            404 => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
            },
            _ => Self::Http(HttpError::Response(HttpResponseError {
                code,
                message: error_message(body),
                request_id: request_id.map(ToString::to_string),
            })),
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(e) => e.request_id(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
