//! REST resources for version 1 of the VerticalResponse API.
//!
//! # Available Resources
//!
//! ## Email Resource
//!
//! - [`Email`] - An email message with launch, test launch and unschedule actions
//! - [`LaunchParams`] - Parameters for [`Email::launch`]
//! - [`ListRef`] - A list reference: a list object or a raw list id
//!
//! Emails are nested under messages: `api/v1/messages/emails/{id}`.
//! Listing emails goes through the message collection filtered by
//! `message_type=email`.
//!
//! ## List Resource
//!
//! - [`List`] - A contact list, listable globally or scoped to an email
//!
//! ## Message Resource
//!
//! - [`Message`] - A campaign message of any type

mod email;
mod list;
mod message;

pub use email::{Email, LaunchParams, ListRef, MESSAGE_TYPE};
pub use list::List;
pub use message::Message;
