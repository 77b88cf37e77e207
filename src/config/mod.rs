//! Configuration types for the VerticalResponse API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`VrConfig`]: The configuration struct holding all client settings
//! - [`VrConfigBuilder`]: A builder for constructing [`VrConfig`] instances
//! - [`AccessToken`]: A validated access token with masked debug output
//! - [`ApiHost`]: A validated API host URL
//!
//! # Example
//!
//! ```rust
//! use verticalresponse_api::{VrConfig, AccessToken};
//!
//! let config = VrConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.host().as_ref(), "https://vrapi.verticalresponse.com");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiHost};

use crate::error::ConfigError;

/// Configuration for the VerticalResponse API client.
///
/// # Thread Safety
///
/// `VrConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct VrConfig {
    access_token: AccessToken,
    host: ApiHost,
    user_agent_prefix: Option<String>,
}

impl VrConfig {
    /// Creates a new builder for constructing a `VrConfig`.
    #[must_use]
    pub fn builder() -> VrConfigBuilder {
        VrConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &ApiHost {
        &self.host
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify VrConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VrConfig>();
};

/// Builder for constructing [`VrConfig`] instances.
///
/// The only required field is `access_token`.
///
/// # Defaults
///
/// - `host`: [`ApiHost::DEFAULT`]
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use verticalresponse_api::{VrConfig, AccessToken, ApiHost};
///
/// let config = VrConfig::builder()
///     .access_token(AccessToken::new("token").unwrap())
///     .host(ApiHost::new("http://localhost:8080").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct VrConfigBuilder {
    access_token: Option<AccessToken>,
    host: Option<ApiHost>,
    user_agent_prefix: Option<String>,
}

impl VrConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Overrides the API host.
    #[must_use]
    pub fn host(mut self, host: ApiHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`VrConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_token` is not set.
    pub fn build(self) -> Result<VrConfig, ConfigError> {
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        Ok(VrConfig {
            access_token,
            host: self.host.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
