//! Failures of [`RestClient`](super::RestClient) calls.

use crate::clients::HttpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestError {
    /// The path was empty once surrounding slashes were stripped, so no
    /// request was sent.
    #[error("Request path {path:?} names no endpoint")]
    InvalidPath { path: String },

    #[error(transparent)]
    Http(#[from] HttpError),
}
