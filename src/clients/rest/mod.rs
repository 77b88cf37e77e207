//! REST API client for the VerticalResponse API.
//!
//! This module provides a higher-level REST API client built on top of the
//! [`HttpClient`](crate::clients::HttpClient).
//!
//! - [`RestClient`]: The REST API client with `get()`, `post()`, `put()`, `delete()` methods
//! - [`RestError`]: Error type for REST API operations
//!
//! # Path Normalization
//!
//! Leading and trailing slashes are stripped: `/api/v1/lists/` -> `api/v1/lists`.
//! A path that is empty after normalization is rejected.
//!
//! # Retry Behavior
//!
//! By default, requests are attempted once. [`RestClient::with_tries`]
//! enables automatic retries on 429 (rate limited) and 500 (server error)
//! responses.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
