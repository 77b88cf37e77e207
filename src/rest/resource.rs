//! REST Resource traits for VerticalResponse API resources.
//!
//! This module defines the [`RestResource`] trait, which derives a
//! resource's network identity (name, identifier path, base URI) from a few
//! constants and provides the generic `find`, `create`, `update` and
//! `delete` operations. Resources with a collection endpoint also implement
//! [`Listable`] to gain `all`.
//!
//! Related resources are reached through [`ScopedResource`], an accessor
//! bound to a parent instance (e.g. the lists an email is targeted to).
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use verticalresponse_api::rest::{Listable, RestResource};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Contact {
//!     pub id: u64,
//!     pub email: String,
//! }
//!
//! impl RestResource for Contact {
//!     const NAME: &'static str = "Contact";
//!     const PLURAL: &'static str = "contacts";
//!
//!     fn get_id(&self) -> Option<u64> {
//!         Some(self.id)
//!     }
//! }
//!
//! impl Listable for Contact {}
//!
//! // GET api/v1/contacts?limit=10
//! let mut options = Params::new();
//! options.insert("limit".to_string(), json!(10));
//! let contacts = Contact::all(&client, options).await?;
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;
use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::{HttpError, HttpResponse, RestClient, RestError};
use crate::rest::{join_path, ResourceError, ResourceResponse, Response, API_BASE_PATH};

/// Caller-supplied key-value parameters for queries and request bodies.
pub type Params = serde_json::Map<String, Value>;

/// A resource of the VerticalResponse API.
///
/// Implementors provide a name and an id accessor; the URI scheme and the
/// single-resource operations come from default methods. Each default can
/// be overridden where the service deviates from the convention (for
/// example, emails live under `messages/emails`).
///
/// # URI Scheme
///
/// - `resource_name()` defaults to `PLURAL`
/// - `resource_identifier_path()` defaults to `resource_name()`
/// - `base_uri()` is `api/v1/{resource_identifier_path}`
/// - `resource_uri(id, segments)` is `{base_uri}/{id}/{segments...}`
#[allow(async_fn_in_trait)]
pub trait RestResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The singular name of the resource (e.g., "Email").
    ///
    /// Used in error messages and log events.
    const NAME: &'static str;

    /// The plural name of the resource (e.g., "lists").
    const PLURAL: &'static str;

    /// Returns the resource's ID if it has one.
    fn get_id(&self) -> Option<u64>;

    /// Returns the resource name used to build paths.
    #[must_use]
    fn resource_name() -> &'static str {
        Self::PLURAL
    }

    /// Returns the collection path segment chain below the API base.
    #[must_use]
    fn resource_identifier_path() -> &'static str {
        Self::resource_name()
    }

    /// Returns the base URI of the resource collection.
    #[must_use]
    fn base_uri() -> Cow<'static, str> {
        Cow::Owned(join_path(&[API_BASE_PATH, Self::resource_identifier_path()]))
    }

    /// Returns the URI of a single resource, optionally followed by
    /// action segments such as `test` or `unschedule`.
    #[must_use]
    fn resource_uri<I: Display>(id: I, segments: &[&str]) -> String {
        member_uri(&Self::base_uri(), id, segments)
    }

    /// Converts caller parameters into a request body.
    ///
    /// `null` values are dropped; everything else is sent as given.
    #[must_use]
    fn build_params(params: Params) -> Value {
        Value::Object(
            params
                .into_iter()
                .filter(|(_, value)| !value.is_null())
                .collect(),
        )
    }

    /// Returns an accessor for resource `R` scoped below the instance
    /// `scope_id` of this resource.
    #[must_use]
    fn class_for_resource<R: RestResource>(scope_id: u64) -> ScopedResource<R> {
        ScopedResource::new(&Self::base_uri(), scope_id)
    }

    /// Finds a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource doesn't exist.
    /// Returns [`ResourceError::Deserialization`] if the payload doesn't match.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let email = Email::find(&client, 42).await?;
    /// println!("Found email {}", email.id);
    /// ```
    async fn find(client: &RestClient, id: u64) -> Result<ResourceResponse<Self>, ResourceError> {
        find_at(client, &Self::resource_uri(id, &[]), id).await
    }

    /// Creates a resource from the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the request.
    async fn create(client: &RestClient, params: Params) -> Result<Response, ResourceError> {
        let uri = Self::base_uri();
        tracing::debug!(resource = Self::NAME, path = %uri, "Creating resource");

        let response = client
            .post(&uri, Some(Self::build_params(params)), None)
            .await
            .map_err(|e| request_error(e, Self::NAME, None))?;

        Ok(ensure_ok(response, Self::NAME, None)?.into())
    }

    /// Updates this resource with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the resource has no ID.
    /// Returns [`ResourceError::NotFound`] if the resource doesn't exist.
    async fn update(&self, client: &RestClient, params: Params) -> Result<Response, ResourceError> {
        let id = self.get_id().ok_or(ResourceError::MissingId {
            resource: Self::NAME,
            operation: "update",
        })?;
        let id_str = id.to_string();
        let uri = Self::resource_uri(id, &[]);
        tracing::debug!(resource = Self::NAME, path = %uri, "Updating resource");

        let response = client
            .put(&uri, Self::build_params(params), None)
            .await
            .map_err(|e| request_error(e, Self::NAME, Some(&id_str)))?;

        Ok(ensure_ok(response, Self::NAME, Some(&id_str))?.into())
    }

    /// Deletes this resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the resource has no ID.
    /// Returns [`ResourceError::NotFound`] if the resource doesn't exist.
    async fn delete(&self, client: &RestClient) -> Result<Response, ResourceError> {
        let id = self.get_id().ok_or(ResourceError::MissingId {
            resource: Self::NAME,
            operation: "delete",
        })?;
        let id_str = id.to_string();
        let uri = Self::resource_uri(id, &[]);
        tracing::debug!(resource = Self::NAME, path = %uri, "Deleting resource");

        let response = client
            .delete(&uri, None)
            .await
            .map_err(|e| request_error(e, Self::NAME, Some(&id_str)))?;

        Ok(ensure_ok(response, Self::NAME, Some(&id_str))?.into())
    }
}

/// A resource with a collection endpoint.
#[allow(async_fn_in_trait)]
pub trait Listable: RestResource {
    /// Lists resources filtered by `options`.
    ///
    /// Options are sent as query parameters: `null` values are skipped,
    /// arrays are comma-joined and objects are JSON-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the request.
    /// Returns [`ResourceError::Deserialization`] if an item doesn't match.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lists = List::all(&client, Params::new()).await?;
    /// for list in lists.iter() {
    ///     println!("{:?}", list.name);
    /// }
    /// ```
    async fn all(
        client: &RestClient,
        options: Params,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        list_at(client, &Self::base_uri(), options).await
    }
}

/// An accessor for resource `R` bound to a parent instance.
///
/// The binding is fixed at creation: every request goes to
/// `{parent_base}/{scope_id}/{R::resource_identifier_path}`.
///
/// # Example
///
/// ```rust
/// use verticalresponse_api::rest::RestResource;
/// use verticalresponse_api::rest::resources::v1::{Email, List};
///
/// let lists = Email::class_for_resource::<List>(42);
/// assert_eq!(lists.base_uri(), "api/v1/messages/emails/42/lists");
/// assert_eq!(lists.scope_id(), 42);
/// ```
pub struct ScopedResource<R> {
    base_uri: String,
    scope_id: u64,
    _resource: PhantomData<fn() -> R>,
}

impl<R: RestResource> ScopedResource<R> {
    /// Binds `R` below the instance `scope_id` of the collection at `parent_base`.
    #[must_use]
    pub fn new(parent_base: &str, scope_id: u64) -> Self {
        Self {
            base_uri: join_path(&[
                parent_base,
                scope_id.to_string().as_str(),
                R::resource_identifier_path(),
            ]),
            scope_id,
            _resource: PhantomData,
        }
    }

    /// Returns the scoped collection URI.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the parent instance ID this accessor is bound to.
    #[must_use]
    pub const fn scope_id(&self) -> u64 {
        self.scope_id
    }

    /// Returns the URI of a single scoped resource.
    #[must_use]
    pub fn resource_uri<I: Display>(&self, id: I, segments: &[&str]) -> String {
        member_uri(&self.base_uri, id, segments)
    }

    /// Finds a single resource by ID within the scope.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource doesn't exist.
    pub async fn find(
        &self,
        client: &RestClient,
        id: u64,
    ) -> Result<ResourceResponse<R>, ResourceError> {
        find_at(client, &self.resource_uri(id, &[]), id).await
    }
}

impl<R: Listable> ScopedResource<R> {
    /// Lists the scoped resources filtered by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the request.
    pub async fn all(
        &self,
        client: &RestClient,
        options: Params,
    ) -> Result<ResourceResponse<Vec<R>>, ResourceError> {
        list_at(client, &self.base_uri, options).await
    }
}

impl<R> Clone for ScopedResource<R> {
    fn clone(&self) -> Self {
        Self {
            base_uri: self.base_uri.clone(),
            scope_id: self.scope_id,
            _resource: PhantomData,
        }
    }
}

impl<R> PartialEq for ScopedResource<R> {
    fn eq(&self, other: &Self) -> bool {
        self.base_uri == other.base_uri
    }
}

impl<R> Eq for ScopedResource<R> {}

impl<R> fmt::Debug for ScopedResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedResource")
            .field("base_uri", &self.base_uri)
            .field("scope_id", &self.scope_id)
            .finish()
    }
}

/// Builds `{base}/{id}/{segments...}` with each action segment percent-encoded.
fn member_uri<I: Display>(base: &str, id: I, segments: &[&str]) -> String {
    let id = id.to_string();
    let mut parts: Vec<Cow<'_, str>> = Vec::with_capacity(segments.len() + 2);
    parts.push(Cow::Borrowed(base));
    parts.push(urlencoding::encode(&id));
    parts.extend(segments.iter().map(|s| urlencoding::encode(s)));
    join_path(&parts)
}

async fn find_at<R: RestResource>(
    client: &RestClient,
    uri: &str,
    id: u64,
) -> Result<ResourceResponse<R>, ResourceError> {
    let id_str = id.to_string();
    tracing::debug!(resource = R::NAME, path = %uri, "Finding resource");

    let response = client
        .get(uri, None)
        .await
        .map_err(|e| request_error(e, R::NAME, Some(&id_str)))?;
    let response = ensure_ok(response, R::NAME, Some(&id_str))?;

    ResourceResponse::from_http_response(&response, R::NAME)
}

async fn list_at<R: RestResource>(
    client: &RestClient,
    uri: &str,
    options: Params,
) -> Result<ResourceResponse<Vec<R>>, ResourceError> {
    let query = Some(params_to_query(options)).filter(|q| !q.is_empty());
    tracing::debug!(resource = R::NAME, path = %uri, "Listing resources");

    let response = client
        .get(uri, query)
        .await
        .map_err(|e| request_error(e, R::NAME, None))?;
    let response = ensure_ok(response, R::NAME, None)?;

    ResourceResponse::from_http_collection(&response, R::NAME)
}

/// Maps a transport failure onto a resource error: 404 becomes `NotFound`,
/// every other HTTP failure `Http`.
pub(crate) fn request_error(
    error: RestError,
    resource: &'static str,
    id: Option<&str>,
) -> ResourceError {
    match error {
        RestError::Http(HttpError::Response(e)) if e.code == 404 => ResourceError::NotFound {
            resource,
            id: id.unwrap_or("unknown").to_string(),
        },
        RestError::Http(e) => ResourceError::Http(e),
        other => ResourceError::Rest(other),
    }
}

/// Rejects non-2xx responses that made it through the transport.
pub(crate) fn ensure_ok(
    response: HttpResponse,
    resource: &'static str,
    id: Option<&str>,
) -> Result<HttpResponse, ResourceError> {
    if response.is_ok() {
        Ok(response)
    } else {
        Err(ResourceError::from_http_response(
            response.code,
            &response.body,
            resource,
            id,
            response.request_id(),
        ))
    }
}

/// Converts listing options to query parameters.
fn params_to_query(options: Params) -> HashMap<String, String> {
    let mut query = HashMap::new();

    for (key, val) in options {
        match val {
            Value::Null => {}
            Value::String(s) => {
                query.insert(key, s);
            }
            Value::Number(n) => {
                query.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                query.insert(key, b.to_string());
            }
            Value::Array(arr) => {
                let values: Vec<String> = arr
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect();
                if !values.is_empty() {
                    query.insert(key, values.join(","));
                }
            }
            Value::Object(_) => {
                query.insert(key, val.to_string());
            }
        }
    }

    query
}
