//! HTTP client types for VerticalResponse API communication.
//!
//! This module provides the transport layer the resource types sit on. It
//! handles request/response processing, authorization headers and retry
//! logic.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`rest::RestClient`]: Path-based client the resources use
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Waits for `Retry-After`, or 1 second when it is absent or unusable
//! - **500 (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, RetriesExhaustedError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest};
pub use http_response::HttpResponse;
pub(crate) use http_response::error_message;

pub use rest::{RestClient, RestError};
