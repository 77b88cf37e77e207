//! Response types for REST resource operations.
//!
//! The VerticalResponse API wraps every payload in a common envelope:
//!
//! ```json
//! {
//!   "url": "https://vrapi.verticalresponse.com/api/v1/lists/7",
//!   "attributes": {"id": 7, "name": "Newsletter"},
//!   "items": [{"url": "...", "attributes": {...}}],
//!   "links": {"self": {"url": "..."}},
//!   "success": {"code": 200, "message": "..."},
//!   "error": {"code": 400, "message": "..."}
//! }
//! ```
//!
//! Two wrappers are provided over that envelope:
//!
//! - [`Response`]: the uniform outcome of an action (launch, unschedule, ...)
//! - [`ResourceResponse<T>`]: typed resource data with `Deref<Target = T>`
//!
//! # Deref Pattern
//!
//! ```rust,ignore
//! let response: ResourceResponse<Vec<List>> = email.lists(&client, Params::new()).await?;
//!
//! for list in response.iter() {
//!     println!("{:?}", list.name);
//! }
//! println!("Count: {}", response.len());
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::clients::HttpResponse;
use crate::rest::ResourceError;

/// The `{code, message}` pair carried by `success` and `error` envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Outcome {
    /// The status code reported by the service.
    #[serde(default)]
    pub code: Option<u16>,
    /// The human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

/// The uniform result of a resource request.
///
/// Wraps the raw envelope so callers can inspect the outcome without
/// knowing the payload shape of the specific endpoint.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use verticalresponse_api::clients::HttpResponse;
/// use verticalresponse_api::rest::Response;
/// use serde_json::json;
///
/// let http = HttpResponse::new(
///     200,
///     HashMap::new(),
///     json!({"success": {"code": 200, "message": "Email launched"}}),
/// );
/// let response = Response::from(http);
///
/// assert!(response.is_success());
/// assert_eq!(response.message(), Some("Email launched"));
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub code: u16,
    /// The resource URL reported by the service.
    pub url: Option<String>,
    /// Attributes of a single resource, when the payload has one.
    pub attributes: Option<Value>,
    /// Collection entries, when the payload has them.
    pub items: Vec<Value>,
    /// Related links reported by the service.
    pub links: Option<Value>,
    /// The success envelope, when present.
    pub success: Option<Outcome>,
    /// The error envelope, when present.
    pub error: Option<Outcome>,
    /// Request ID from the X-Request-Id header.
    pub request_id: Option<String>,
    /// The untouched response body.
    pub raw: Value,
}

impl Response {
    /// Returns `true` for a 2xx response without an error envelope.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code) && self.error.is_none()
    }

    /// Returns the service message from the success or error envelope.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .or(self.success.as_ref())
            .and_then(|o| o.message.as_deref())
    }
}

impl From<HttpResponse> for Response {
    fn from(response: HttpResponse) -> Self {
        let request_id = response.request_id().map(ToString::to_string);
        let body = response.body;

        let outcome = |key: &str| {
            body.get(key)
                .cloned()
                .and_then(|v| serde_json::from_value::<Outcome>(v).ok())
        };

        Self {
            code: response.code,
            url: body.get("url").and_then(Value::as_str).map(ToString::to_string),
            attributes: body.get("attributes").cloned(),
            items: body
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            links: body.get("links").cloned(),
            success: outcome("success"),
            error: outcome("error"),
            request_id,
            raw: body,
        }
    }
}

/// A response from a REST resource operation.
///
/// This wrapper combines the resource data with the request ID from the
/// HTTP response. It implements `Deref<Target = T>` so methods on `T` can
/// be called directly.
///
/// # Example
///
/// ```rust
/// use verticalresponse_api::rest::ResourceResponse;
///
/// let response = ResourceResponse::new(vec!["a", "b"], Some("req-1".to_string()));
///
/// assert_eq!(response.len(), 2);
/// assert_eq!(response[0], "a");
/// assert_eq!(response.request_id(), Some("req-1"));
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    request_id: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Creates a new `ResourceResponse`.
    #[must_use]
    pub const fn new(data: T, request_id: Option<String>) -> Self {
        Self { data, request_id }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a reference to the inner data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns the request ID, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Transforms the inner data, keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ResourceResponse<U> {
        ResourceResponse {
            data: f(self.data),
            request_id: self.request_id,
        }
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Builds a single-resource response from the envelope's `attributes`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialization`] if `attributes` is missing
    /// or does not match `T`.
    pub fn from_http_response(
        response: &HttpResponse,
        resource: &'static str,
    ) -> Result<Self, ResourceError> {
        let attributes = response
            .body
            .get("attributes")
            .cloned()
            .unwrap_or(Value::Null);

        let data = serde_json::from_value(attributes)
            .map_err(|source| ResourceError::Deserialization { resource, source })?;

        Ok(Self::new(data, response.request_id().map(ToString::to_string)))
    }
}

impl<T: DeserializeOwned> ResourceResponse<Vec<T>> {
    /// Builds a collection response from `items[].attributes`.
    ///
    /// A body without `items` yields an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialization`] if an item does not match `T`.
    pub fn from_http_collection(
        response: &HttpResponse,
        resource: &'static str,
    ) -> Result<Self, ResourceError> {
        let items = response
            .body
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let data = items
            .iter()
            .map(|item| {
                let attributes = item.get("attributes").cloned().unwrap_or(Value::Null);
                serde_json::from_value(attributes)
                    .map_err(|source| ResourceError::Deserialization { resource, source })
            })
            .collect::<Result<Vec<T>, _>>()?;

        Ok(Self::new(data, response.request_id().map(ToString::to_string)))
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}
