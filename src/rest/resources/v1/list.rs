//! List resource implementation.
//!
//! A list is a named set of contacts that emails are launched to. Lists are
//! reachable both globally and scoped below an email:
//! - `GET api/v1/lists`
//! - `GET api/v1/lists/{id}`
//! - `GET api/v1/messages/emails/{email_id}/lists`
//!
//! # Example
//!
//! ```rust,ignore
//! use verticalresponse_api::rest::{Listable, Params, RestResource};
//! use verticalresponse_api::rest::resources::v1::List;
//!
//! let lists = List::all(&client, Params::new()).await?;
//! let newsletter = List::find(&client, 7).await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::rest::{Listable, Params, RestResource};

/// A contact list.
///
/// Only `id` and `name` are typed; every other attribute the service
/// returns is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct List {
    /// The unique identifier of the list.
    pub id: u64,

    /// The display name of the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Remaining attributes as returned by the service.
    #[serde(flatten)]
    pub extra: Params,
}

impl RestResource for List {
    const NAME: &'static str = "List";
    const PLURAL: &'static str = "lists";

    fn get_id(&self) -> Option<u64> {
        Some(self.id)
    }
}

impl Listable for List {}
