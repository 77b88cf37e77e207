//! Email resource implementation.
//!
//! Emails are messages of type `email`. The service nests them below the
//! message collection, so their URIs are rooted at `api/v1/messages/emails`:
//! - `GET api/v1/messages/emails/{id}`
//! - `GET api/v1/messages/emails/{id}/lists`
//! - `POST api/v1/messages/emails/{id}` (launch)
//! - `POST api/v1/messages/emails/{id}/test`
//! - `POST api/v1/messages/emails/{id}/unschedule`
//!
//! There is no email collection endpoint. [`Email::all`] lists messages
//! filtered by `message_type=email` instead.
//!
//! # Launching
//!
//! A launch targets lists by id. [`LaunchParams`] accepts the lists as
//! [`List`] values, raw ids, or both, and merges them into a single
//! duplicate-free `list_ids` entry:
//!
//! ```rust
//! use verticalresponse_api::rest::resources::v1::{LaunchParams, List};
//!
//! let newsletter = List { id: 5, ..Default::default() };
//! let body = LaunchParams::new()
//!     .param("subject", "Hi")
//!     .list(&newsletter)
//!     .list(7u64)
//!     .list(5u64)
//!     .into_body()
//!     .unwrap();
//!
//! assert_eq!(body["list_ids"], serde_json::json!([5, 7]));
//! assert!(!body.contains_key("lists"));
//! ```

use std::borrow::Cow;
use std::collections::HashSet;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{List, Message};
use crate::clients::RestClient;
use crate::rest::{
    ensure_ok, join_path, request_error, Listable, Params, ResourceError, ResourceResponse,
    Response, RestResource, ScopedResource, API_BASE_PATH,
};

/// The `message_type` discriminator for emails.
pub const MESSAGE_TYPE: &str = "email";

/// An email message.
///
/// Constructing an email, including deserializing one from a response,
/// binds a [`List`] accessor scoped to its id. [`Email::lists`] always goes
/// through that accessor.
///
/// Serializes as its attribute object: `id` plus the flattened attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EmailRecord", into = "EmailRecord")]
pub struct Email {
    /// The unique identifier assigned by the service.
    pub id: u64,

    /// The remaining attributes as returned by the service.
    pub attributes: Params,

    list_scope: ScopedResource<List>,
}

#[derive(Serialize, Deserialize)]
struct EmailRecord {
    id: u64,
    #[serde(flatten)]
    attributes: Params,
}

impl From<EmailRecord> for Email {
    fn from(record: EmailRecord) -> Self {
        Self::new(record.id, record.attributes)
    }
}

impl From<Email> for EmailRecord {
    fn from(email: Email) -> Self {
        Self {
            id: email.id,
            attributes: email.attributes,
        }
    }
}

impl Email {
    /// Creates an email from its id and attributes.
    #[must_use]
    pub fn new(id: u64, attributes: Params) -> Self {
        Self {
            id,
            attributes,
            list_scope: Self::class_for_resource::<List>(id),
        }
    }

    /// Returns a single attribute by name.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns the list accessor bound to this email.
    #[must_use]
    pub const fn list_scope(&self) -> &ScopedResource<List> {
        &self.list_scope
    }

    /// Returns `options` with the email discriminator applied on top.
    ///
    /// A caller-supplied `message_type` is overwritten.
    #[must_use]
    pub fn listing_options(mut options: Params) -> Params {
        options.insert("message_type".to_string(), Value::from(MESSAGE_TYPE));
        options
    }

    /// Lists emails through the message collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the message listing fails.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let emails = Email::all(&client, Params::new()).await?;
    /// for message in emails.iter() {
    ///     println!("{} {:?}", message.id, message.status);
    /// }
    /// ```
    pub async fn all(
        client: &RestClient,
        options: Params,
    ) -> Result<ResourceResponse<Vec<Message>>, ResourceError> {
        Self::all_with::<Message>(client, options).await
    }

    /// Lists emails through the given message collection `M`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the listing fails.
    pub async fn all_with<M: Listable>(
        client: &RestClient,
        options: Params,
    ) -> Result<ResourceResponse<Vec<M>>, ResourceError> {
        M::all(client, Self::listing_options(options)).await
    }

    /// Lists the lists this email is targeted to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn lists(
        &self,
        client: &RestClient,
        options: Params,
    ) -> Result<ResourceResponse<Vec<List>>, ResourceError> {
        self.list_scope.all(client, options).await
    }

    /// Sends a test launch of this email.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the service rejects the request.
    pub async fn test_launch(
        &self,
        client: &RestClient,
        params: Params,
    ) -> Result<Response, ResourceError> {
        self.post_action(client, &["test"], Some(Self::build_params(params)))
            .await
    }

    /// Launches this email.
    ///
    /// Any `lists` are resolved and merged into `list_ids`; see
    /// [`LaunchParams::into_body`]. Passing `&Params` leaves the caller's
    /// map untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidListReference`] if a list reference
    /// cannot be resolved, before any request is made.
    /// Returns [`ResourceError`] if the service rejects the launch.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lists = email.lists(&client, Params::new()).await?;
    /// let params = LaunchParams::new().lists(lists.iter()).list(7u64);
    /// let response = email.launch(&client, params).await?;
    /// ```
    pub async fn launch(
        &self,
        client: &RestClient,
        params: impl Into<LaunchParams>,
    ) -> Result<Response, ResourceError> {
        let body = params.into().into_body()?;
        self.post_action(client, &[], Some(Self::build_params(body)))
            .await
    }

    /// Unschedules this email.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the service rejects the request.
    pub async fn unschedule(&self, client: &RestClient) -> Result<Response, ResourceError> {
        self.post_action(client, &["unschedule"], None).await
    }

    async fn post_action(
        &self,
        client: &RestClient,
        segments: &[&str],
        body: Option<Value>,
    ) -> Result<Response, ResourceError> {
        let id = self.id.to_string();
        let uri = Self::resource_uri(self.id, segments);
        tracing::debug!(resource = Self::NAME, path = %uri, "Posting email action");

        let response = client
            .post(&uri, body, None)
            .await
            .map_err(|e| request_error(e, Self::NAME, Some(&id)))?;

        Ok(ensure_ok(response, Self::NAME, Some(&id))?.into())
    }
}

impl RestResource for Email {
    const NAME: &'static str = "Email";
    const PLURAL: &'static str = "emails";

    fn get_id(&self) -> Option<u64> {
        Some(self.id)
    }

    fn resource_identifier_path() -> &'static str {
        "messages/emails"
    }

    fn base_uri() -> Cow<'static, str> {
        static BASE_URI: OnceCell<String> = OnceCell::new();
        Cow::Borrowed(
            BASE_URI
                .get_or_init(|| join_path(&[API_BASE_PATH, Self::resource_identifier_path()]))
                .as_str(),
        )
    }
}

/// A reference to a list in a launch.
///
/// `Identified` carries an id taken from a list object; `Raw` carries a
/// value that still has to be coerced to an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRef {
    /// An id read from a list object.
    Identified(u64),
    /// A raw value: an unsigned integer or a string holding one.
    Raw(Value),
}

impl ListRef {
    /// Resolves the list id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidListReference`] for raw values that
    /// are neither unsigned integers nor strings parsing to one.
    pub fn resolve(&self) -> Result<u64, ResourceError> {
        let value = match self {
            Self::Identified(id) => return Ok(*id),
            Self::Raw(value) => value,
        };

        let id = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        id.ok_or_else(|| ResourceError::InvalidListReference {
            value: value.to_string(),
        })
    }
}

impl From<u64> for ListRef {
    fn from(id: u64) -> Self {
        Self::Raw(Value::from(id))
    }
}

impl From<&List> for ListRef {
    fn from(list: &List) -> Self {
        Self::Identified(list.id)
    }
}

impl From<List> for ListRef {
    fn from(list: List) -> Self {
        Self::Identified(list.id)
    }
}

impl From<&str> for ListRef {
    fn from(value: &str) -> Self {
        Self::Raw(Value::from(value))
    }
}

impl From<String> for ListRef {
    fn from(value: String) -> Self {
        Self::Raw(Value::from(value))
    }
}

impl From<Value> for ListRef {
    /// Objects carrying an `id` are treated as list objects.
    fn from(value: Value) -> Self {
        if let Some(id) = value.as_object().and_then(|map| map.get("id")) {
            return id
                .as_u64()
                .map_or_else(|| Self::Raw(id.clone()), Self::Identified);
        }
        Self::Raw(value)
    }
}

/// Parameters for [`Email::launch`].
///
/// Holds the plain body parameters separately from the list references so
/// the references can be resolved when the body is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchParams {
    params: Params,
    lists: Option<Vec<ListRef>>,
}

impl LaunchParams {
    /// Creates empty launch parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a body parameter.
    ///
    /// A `lists` key is routed to the list references.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "lists" {
            self.push_lists_value(value);
        } else {
            self.params.insert(key, value);
        }
        self
    }

    /// Adds a list reference.
    #[must_use]
    pub fn list(mut self, list: impl Into<ListRef>) -> Self {
        self.lists.get_or_insert_with(Vec::new).push(list.into());
        self
    }

    /// Adds several list references.
    ///
    /// Calling this with an empty iterator still marks the launch as
    /// targeting lists, so the body carries a `list_ids` entry.
    #[must_use]
    pub fn lists<I, L>(mut self, lists: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<ListRef>,
    {
        self.lists
            .get_or_insert_with(Vec::new)
            .extend(lists.into_iter().map(Into::into));
        self
    }

    /// Returns the list references, if any were given.
    #[must_use]
    pub fn list_refs(&self) -> Option<&[ListRef]> {
        self.lists.as_deref()
    }

    /// Builds the launch body.
    ///
    /// - `lists` never appears in the body.
    /// - Without list references the remaining parameters, `list_ids`
    ///   included, are returned as given.
    /// - With list references the body has a `list_ids` array: the pre-set
    ///   entries as given, then the ids resolved from the references, each
    ///   value kept at its first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidListReference`] if a list reference
    /// cannot be resolved.
    pub fn into_body(self) -> Result<Params, ResourceError> {
        let Self { mut params, lists } = self;
        let Some(lists) = lists else {
            return Ok(params);
        };

        let mut list_ids = match params.remove("list_ids") {
            Some(Value::Array(entries)) => entries,
            Some(Value::Null) | None => Vec::new(),
            Some(single) => vec![single],
        };
        for list in &lists {
            list_ids.push(Value::from(list.resolve()?));
        }

        let mut seen = HashSet::new();
        list_ids.retain(|id| seen.insert(id.to_string()));

        tracing::debug!(list_ids = ?list_ids, "Resolved email launch lists");

        params.insert("list_ids".to_string(), Value::Array(list_ids));
        Ok(params)
    }

    fn push_lists_value(&mut self, value: Value) {
        let refs = self.lists.get_or_insert_with(Vec::new);
        match value {
            Value::Array(entries) => refs.extend(entries.into_iter().map(ListRef::from)),
            single => refs.push(ListRef::from(single)),
        }
    }
}

impl From<Params> for LaunchParams {
    fn from(mut params: Params) -> Self {
        let mut launch = Self::default();
        if let Some(value) = params.remove("lists").filter(|v| !v.is_null()) {
            launch.push_lists_value(value);
        }
        launch.params = params;
        launch
    }
}

impl From<&Params> for LaunchParams {
    fn from(params: &Params) -> Self {
        Self::from(params.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_resource_identifier_path_is_nested_under_messages() {
        assert_eq!(Email::resource_identifier_path(), "messages/emails");
        assert_eq!(Email::resource_name(), "emails");
    }

    #[test]
    fn test_base_uri_is_memoized() {
        let first = Email::base_uri();
        let second = Email::base_uri();

        assert_eq!(first, "api/v1/messages/emails");
        assert!(matches!(first, Cow::Borrowed(_)));
        assert!(std::ptr::eq(first.as_ref(), second.as_ref()));
    }

    #[test]
    fn test_base_uri_converges_across_threads() {
        let addresses: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| Email::base_uri().as_ptr() as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let expected = Email::base_uri().as_ptr() as usize;
        assert!(addresses.iter().all(|&address| address == expected));
    }

    #[test]
    fn test_resource_uri_for_actions() {
        assert_eq!(
            Email::resource_uri(42, &["unschedule"]),
            "api/v1/messages/emails/42/unschedule"
        );
        assert_eq!(
            Email::resource_uri(42, &["test"]),
            "api/v1/messages/emails/42/test"
        );
        assert_eq!(Email::resource_uri(42, &[]), "api/v1/messages/emails/42");
    }

    #[test]
    fn test_new_binds_list_scope_to_email_id() {
        let email = Email::new(42, Params::new());

        assert_eq!(email.list_scope().scope_id(), 42);
        assert_eq!(
            email.list_scope().base_uri(),
            "api/v1/messages/emails/42/lists"
        );
    }

    #[test]
    fn test_deserialize_runs_constructor() {
        let email: Email = serde_json::from_value(json!({
            "id": 9,
            "name": "Welcome",
            "subject": "Hello"
        }))
        .unwrap();

        assert_eq!(email.id, 9);
        assert_eq!(email.attribute("subject"), Some(&json!("Hello")));
        assert_eq!(email.list_scope().base_uri(), "api/v1/messages/emails/9/lists");
    }

    #[test]
    fn test_serialize_flattens_attributes() {
        let email = Email::new(9, params(json!({"name": "Welcome"})));
        assert_eq!(
            serde_json::to_value(&email).unwrap(),
            json!({"id": 9, "name": "Welcome"})
        );
    }

    #[test]
    fn test_listing_options_adds_discriminator() {
        let options = Email::listing_options(params(json!({"foo": 1})));
        assert_eq!(Value::Object(options), json!({"foo": 1, "message_type": "email"}));
    }

    #[test]
    fn test_listing_options_discriminator_wins() {
        let options = Email::listing_options(params(json!({"message_type": "sms", "limit": 5})));
        assert_eq!(options["message_type"], json!("email"));
        assert_eq!(options["limit"], json!(5));
    }

    #[test]
    fn test_launch_body_merges_and_dedupes_lists() {
        let body = LaunchParams::from(params(json!({
            "subject": "Hi",
            "lists": [{"id": 5}, 7, 5]
        })))
        .into_body()
        .unwrap();

        assert_eq!(Value::Object(body), json!({"subject": "Hi", "list_ids": [5, 7]}));
    }

    #[test]
    fn test_launch_body_keeps_preset_ids_first() {
        let body = LaunchParams::from(params(json!({
            "list_ids": [3, 7, 3],
            "lists": [7, {"id": 1}, "3", 9]
        })))
        .into_body()
        .unwrap();

        assert_eq!(body["list_ids"], json!([3, 7, 1, 9]));
        assert!(!body.contains_key("lists"));
    }

    #[test]
    fn test_launch_body_without_lists_is_unchanged() {
        let body = LaunchParams::from(params(json!({"subject": "Hi"})))
            .into_body()
            .unwrap();
        assert_eq!(Value::Object(body), json!({"subject": "Hi"}));
    }

    #[test]
    fn test_launch_body_with_empty_lists_has_empty_list_ids() {
        let body = LaunchParams::from(params(json!({"lists": []})))
            .into_body()
            .unwrap();
        assert_eq!(Value::Object(body), json!({"list_ids": []}));
    }

    #[test]
    fn test_launch_body_null_lists_is_ignored() {
        let body = LaunchParams::from(params(json!({"lists": null, "list_ids": null})))
            .into_body()
            .unwrap();
        assert_eq!(Value::Object(body), json!({"list_ids": null}));
    }

    #[test]
    fn test_launch_body_null_preset_ids_with_lists_starts_empty() {
        let body = LaunchParams::from(params(json!({"lists": [2, 2], "list_ids": null})))
            .into_body()
            .unwrap();
        assert_eq!(body["list_ids"], json!([2]));
    }

    #[test]
    fn test_launch_body_rejects_unresolvable_reference() {
        let result = LaunchParams::new().list("abc").into_body();

        match result {
            Err(ResourceError::InvalidListReference { value }) => assert_eq!(value, "\"abc\""),
            other => panic!("Expected InvalidListReference, got {other:?}"),
        }
    }

    #[test]
    fn test_launch_body_without_lists_forwards_preset_ids_as_given() {
        let body = LaunchParams::from(params(json!({"subject": "Hi", "list_ids": ["abc"]})))
            .into_body()
            .unwrap();
        assert_eq!(Value::Object(body), json!({"subject": "Hi", "list_ids": ["abc"]}));

        let body = LaunchParams::new()
            .param("list_ids", json!([1, 1]))
            .into_body()
            .unwrap();
        assert_eq!(body["list_ids"], json!([1, 1]));
    }

    #[test]
    fn test_launch_body_keeps_uncoerced_preset_entries_when_merging() {
        let body = LaunchParams::new()
            .param("list_ids", json!(["abc", 4, "abc"]))
            .list(4u64)
            .list("6")
            .into_body()
            .unwrap();
        assert_eq!(body["list_ids"], json!(["abc", 4, 6]));
    }

    #[test]
    fn test_launch_body_wraps_single_preset_id() {
        let body = LaunchParams::new()
            .param("list_ids", json!(3))
            .list(5u64)
            .into_body()
            .unwrap();
        assert_eq!(body["list_ids"], json!([3, 5]));
    }

    #[test]
    fn test_from_params_ref_leaves_caller_map_untouched() {
        let original = params(json!({"subject": "Hi", "lists": [1, 2]}));
        let body = LaunchParams::from(&original).into_body().unwrap();

        assert_eq!(original["lists"], json!([1, 2]));
        assert!(!original.contains_key("list_ids"));
        assert_eq!(body["list_ids"], json!([1, 2]));
    }

    #[test]
    fn test_fluent_builder_accepts_mixed_references() {
        let lists = vec![
            List {
                id: 4,
                ..Default::default()
            },
            List {
                id: 8,
                ..Default::default()
            },
        ];

        let launch = LaunchParams::new()
            .param("subject", "Hi")
            .lists(lists.iter())
            .list(8u64)
            .list("12".to_string())
            .param("lists", json!([4, 13]));

        assert_eq!(launch.list_refs().map(<[ListRef]>::len), Some(6));

        let body = launch.into_body().unwrap();
        assert_eq!(body["list_ids"], json!([4, 8, 12, 13]));
        assert_eq!(body["subject"], json!("Hi"));
    }

    #[test]
    fn test_lists_with_empty_iterator_still_sets_list_ids() {
        let body = LaunchParams::new()
            .lists(Vec::<u64>::new())
            .into_body()
            .unwrap();
        assert_eq!(body["list_ids"], json!([]));
    }

    #[test]
    fn test_list_ref_from_value_variants() {
        assert_eq!(ListRef::from(json!({"id": 5})), ListRef::Identified(5));
        assert_eq!(ListRef::from(json!({"id": "6"})), ListRef::Raw(json!("6")));
        assert_eq!(ListRef::from(json!(7)), ListRef::Raw(json!(7)));
        assert_eq!(ListRef::from(json!({"name": "x"})), ListRef::Raw(json!({"name": "x"})));
    }

    #[test]
    fn test_list_ref_resolve() {
        assert_eq!(ListRef::Identified(5).resolve().unwrap(), 5);
        assert_eq!(ListRef::from(7u64).resolve().unwrap(), 7);
        assert_eq!(ListRef::from(" 12 ").resolve().unwrap(), 12);
        assert_eq!(ListRef::from(json!({"id": "6"})).resolve().unwrap(), 6);
        assert!(ListRef::from(json!(-1)).resolve().is_err());
        assert!(ListRef::from(json!(1.5)).resolve().is_err());
        assert!(ListRef::from(json!({"name": "x"})).resolve().is_err());
    }
}
