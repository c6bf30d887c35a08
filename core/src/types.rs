//! Domain DTOs for the Chatwork API.
//!
//! # Design
//! Identifiers get newtypes so a room id can't be passed where an account id
//! is expected. Response types mirror the JSON Chatwork returns; the mock
//! server defines its own copies and the integration tests catch drift.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat room (group chat, direct chat or "my chat").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub i64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Chatwork account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message ids are decimal strings on the wire and can exceed what some
/// clients store in 53 bits, so they stay strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId(s.to_string())
    }
}

/// Join user ids with `sep`, e.g. `[1, 2, 3]` and `","` give `"1,2,3"`.
pub fn join_user_ids(ids: &[UserId], sep: &str) -> String {
    ids.iter()
        .map(|id| id.0.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Request to post a message into a room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessage {
    pub room_id: RoomId,
    pub body: String,
}

impl CreateMessage {
    pub fn new(room_id: RoomId, body: impl Into<String>) -> Self {
        Self {
            room_id,
            body: body.into(),
        }
    }
}

/// Request to create a task assigned to one or more accounts.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub room_id: RoomId,
    pub body: String,
    pub assignees: Vec<UserId>,
    /// Due time; sent as Unix seconds in the `limit` field.
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
}

impl CreateTask {
    pub fn new(room_id: RoomId, body: impl Into<String>, assignees: Vec<UserId>) -> Self {
        Self {
            room_id,
            body: body.into(),
            assignees,
            due: None,
        }
    }

    pub fn due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMessageResponse {
    pub message_id: MessageId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    pub task_ids: Vec<i64>,
}

/// The short account summary embedded in messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: UserId,
    pub name: String,
    #[serde(default)]
    pub avatar_image_url: String,
}

/// A single message as returned by the get-message endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    pub account: Account,
    pub body: String,
    /// Unix seconds.
    pub send_time: i64,
    /// Unix seconds; 0 when the message was never edited.
    #[serde(default)]
    pub update_time: i64,
}

/// Profile of the account owning the API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Me {
    pub account_id: UserId,
    /// The account's "my chat" room.
    pub room_id: RoomId,
    pub name: String,
    #[serde(default)]
    pub chatwork_id: String,
    #[serde(default)]
    pub organization_id: i64,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub mail: String,
    #[serde(default)]
    pub tel_organization: String,
    #[serde(default)]
    pub tel_extension: String,
    #[serde(default)]
    pub tel_mobile: String,
    #[serde(default)]
    pub skype: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub avatar_image_url: String,
}
