//! # VerticalResponse API Rust Client
//!
//! A Rust client for the VerticalResponse marketing email API, providing
//! type-safe configuration, an async HTTP client with retry handling, and a
//! typed resource model for emails, lists and messages.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`VrConfig`] and [`VrConfigBuilder`]
//! - Validated newtypes for the access token and API host
//! - Async HTTP client with retry logic for rate limits and server errors
//! - REST resources with URI derivation and scoped sub-resources via [`rest`]
//! - Email actions: launch, test launch and unschedule
//!
//! ## Quick Start
//!
//! ```rust
//! use verticalresponse_api::{AccessToken, VrConfig};
//!
//! let config = VrConfig::builder()
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.host().as_ref(), "https://vrapi.verticalresponse.com");
//! ```
//!
//! ## Working With Emails
//!
//! ```rust,ignore
//! use verticalresponse_api::{AccessToken, RestClient, VrConfig};
//! use verticalresponse_api::rest::{Params, RestResource};
//! use verticalresponse_api::rest::resources::{Email, LaunchParams};
//!
//! let config = VrConfig::builder()
//!     .access_token(AccessToken::new("your-access-token")?)
//!     .build()?;
//! let client = RestClient::new(&config)?.with_tries(3);
//!
//! // All emails, listed through the message collection
//! let emails = Email::all(&client, Params::new()).await?;
//!
//! // A single email and the lists it targets
//! let email = Email::find(&client, 42).await?.into_inner();
//! let lists = email.lists(&client, Params::new()).await?;
//!
//! // Send a test, then launch to the same lists plus list 7
//! email.test_launch(&client, Params::new()).await?;
//! let params = LaunchParams::new().lists(lists.iter()).list(7u64);
//! let response = email.launch(&client, params).await?;
//! println!("{:?}", response.message());
//!
//! // Changed our minds
//! email.unschedule(&client).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Pure parameters**: Caller-supplied parameters are never mutated

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ApiHost, VrConfig, VrConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, HttpResponseError, RestClient,
    RestError, RetriesExhaustedError,
};

// Re-export resource types
pub use rest::{
    Listable, Params, ResourceError, ResourceResponse, Response, RestResource, ScopedResource,
};
