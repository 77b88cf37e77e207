//! Version-specific REST resource implementations.
//!
//! Resources are organized by API version:
//!
//! ```text
//! resources/
//!   mod.rs     <- This file (re-exports the current version)
//!   v1/
//!     mod.rs   <- Version-specific resources
//! ```
//!
//! The current version is re-exported at this module level:
//!
//! ```rust,ignore
//! use verticalresponse_api::rest::resources::Email;
//!
//! // Or explicitly:
//! use verticalresponse_api::rest::resources::v1::Email;
//! ```

pub mod v1;

pub use v1::{Email, LaunchParams, List, ListRef, Message, MESSAGE_TYPE};
