//! Message resource implementation.
//!
//! Messages are the common container for every kind of campaign the service
//! sends. Listing messages accepts a `message_type` filter, which is how
//! emails are enumerated:
//! - `GET api/v1/messages?message_type=email`

use serde::{Deserialize, Serialize};

use crate::rest::{Listable, Params, RestResource};

/// A campaign message of any type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Message {
    /// The unique identifier of the message.
    pub id: u64,

    /// The display name of the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The kind of message (e.g. `email`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,

    /// The delivery status (e.g. `draft`, `scheduled`, `sent`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Remaining attributes as returned by the service.
    #[serde(flatten)]
    pub extra: Params,
}

impl RestResource for Message {
    const NAME: &'static str = "Message";
    const PLURAL: &'static str = "messages";

    fn get_id(&self) -> Option<u64> {
        Some(self.id)
    }
}

impl Listable for Message {}
