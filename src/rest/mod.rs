//! REST Resource infrastructure for the VerticalResponse API.
//!
//! This module provides the foundational infrastructure for REST resources with:
//!
//! - **[`RestResource`] trait**: URI derivation and single-resource operations
//! - **[`Listable`] trait**: Collection listing for resources that support it
//! - **[`ScopedResource<R>`]**: An accessor for `R` bound to a parent instance
//! - **[`Response`]**: The uniform outcome of an action request
//! - **[`ResourceResponse<T>`]**: A Deref-based wrapper for typed resource data
//! - **[`ResourceError`]**: Semantic error types for resource operations
//!
//! Individual resources (Email, List, Message) are implemented in the
//! [`resources`] submodule.
//!
//! # Example
//!
//! ```rust,ignore
//! use verticalresponse_api::{AccessToken, RestClient, VrConfig};
//! use verticalresponse_api::rest::{Params, RestResource};
//! use verticalresponse_api::rest::resources::v1::{Email, LaunchParams};
//!
//! let config = VrConfig::builder()
//!     .access_token(AccessToken::new("token")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! // Find an email and inspect its target lists
//! let email = Email::find(&client, 42).await?.into_inner();
//! let lists = email.lists(&client, Params::new()).await?;
//!
//! // Launch it to two more lists
//! let params = LaunchParams::new().list(lists[0].clone()).list(7u64);
//! let response = email.launch(&client, params).await?;
//! assert!(response.is_success());
//! ```

mod errors;
mod path;
mod resource;
mod response;

pub mod resources;

// Public exports
pub use errors::ResourceError;
pub use path::{join_path, API_BASE_PATH};
pub use resource::{Listable, Params, RestResource, ScopedResource};
pub use response::{Outcome, ResourceResponse, Response};

pub(crate) use resource::{ensure_ok, request_error};
