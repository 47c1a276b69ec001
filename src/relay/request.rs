//! Validate inbound request bodies before any network call is made.
//!
//! Bodies are first decoded leniently, with every field optional, and then
//! checked field by field so that callers are told about the first problem in
//! a fixed order:
//!
//! 1. `message` is present (notifications only).
//! 2. `channel_type` is present and recognised.
//! 3. `recipient_id` is present for `dm`.
//! 4. `channel_id` is present for `channel` and `group`.

use super::{error::RelayError, format::Format};
use crate::de::{blank_as_none, or_default};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// The logical kind of destination a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelType {
    Dm,
    Channel,
    Group,
}

impl FromStr for ChannelType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dm" => Ok(ChannelType::Dm),
            "channel" => Ok(ChannelType::Channel),
            "group" => Ok(ChannelType::Group),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ChannelType::Dm => "dm",
            ChannelType::Channel => "channel",
            ChannelType::Group => "group",
        };

        write!(f, "{}", x)
    }
}

/// Where a message goes upstream. Groups are channels as far as Zoom is
/// concerned, so there's no separate variant for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Contact(String),
    Channel(String),
}

/// Advisory only. Accepted for callers' convenience and never sent to Zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(()),
        }
    }
}

/// A validated request to `/notify`.
#[derive(Debug, PartialEq)]
pub struct NotificationRequest {
    pub message: String,
    pub channel_type: ChannelType,
    pub destination: Destination,
    pub format: Format,
    pub priority: Priority,
    pub thread_id: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

/// A validated request to `/validate`.
#[derive(Debug, PartialEq)]
pub struct ValidationRequest {
    pub channel_type: ChannelType,
    pub destination: Destination,
}

/// The notification body as sent, prior to validation. Fields are kept as raw
/// JSON so that type problems surface in the same order as missing fields.
#[derive(Deserialize)]
struct RawNotification {
    #[serde(default, deserialize_with = "blank_as_none")]
    message: Option<Value>,
    #[serde(flatten)]
    target: RawTarget,
    #[serde(default, deserialize_with = "or_default")]
    format: Format,
    #[serde(default, deserialize_with = "or_default")]
    priority: Priority,
    #[serde(default, deserialize_with = "blank_as_none")]
    thread_id: Option<Value>,
    #[serde(default)]
    metadata: Option<Value>,
}

/// The destination fields common to both endpoints.
#[derive(Deserialize)]
struct RawTarget {
    #[serde(default, deserialize_with = "blank_as_none")]
    channel_type: Option<Value>,
    #[serde(default, deserialize_with = "blank_as_none")]
    recipient_id: Option<Value>,
    #[serde(default, deserialize_with = "blank_as_none")]
    channel_id: Option<Value>,
}

impl RawTarget {
    fn validate(self) -> Result<(ChannelType, Destination), RelayError> {
        let channel_type: ChannelType = text("channel_type", self.channel_type)?
            .ok_or_else(|| invalid("channel_type is required"))?
            .parse()
            .map_err(|_| invalid("channel_type must be one of: dm, channel, group"))?;

        // Only the identifier relevant to the channel type is inspected.
        let destination = match channel_type {
            ChannelType::Dm => text("recipient_id", self.recipient_id)?
                .map(Destination::Contact)
                .ok_or_else(|| invalid("recipient_id is required for DM"))?,
            ChannelType::Channel | ChannelType::Group => text("channel_id", self.channel_id)?
                .map(Destination::Channel)
                .ok_or_else(|| invalid("channel_id is required for channel and group messages"))?,
        };

        Ok((channel_type, destination))
    }
}

/// Parse and validate a `/notify` body.
pub fn parse_notification(body: &[u8]) -> Result<NotificationRequest, RelayError> {
    let raw: RawNotification = parse_object(body)?;

    let message = text("message", raw.message)?.ok_or_else(|| invalid("message is required"))?;
    let (channel_type, destination) = raw.target.validate()?;
    let thread_id = text("thread_id", raw.thread_id)?;

    let metadata = match raw.metadata {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => return Err(invalid("metadata must be an object")),
    };

    Ok(NotificationRequest {
        message,
        channel_type,
        destination,
        format: raw.format,
        priority: raw.priority,
        thread_id,
        metadata,
    })
}

/// Parse and validate a `/validate` body.
pub fn parse_validation(body: &[u8]) -> Result<ValidationRequest, RelayError> {
    let raw: RawTarget = parse_object(body)?;
    let (channel_type, destination) = raw.validate()?;

    Ok(ValidationRequest {
        channel_type,
        destination,
    })
}

/// Unparsable JSON is reported separately from JSON of the wrong shape.
fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, RelayError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| RelayError::MalformedJson)?;

    // Structs would otherwise happily deserialize from arrays.
    if !value.is_object() {
        return Err(invalid("Request body must be a JSON object"));
    }

    serde_json::from_value(value).map_err(|e| invalid(format!("Invalid request body: {}", e)))
}

/// A field which must be a string if it's present at all.
fn text(field: &str, value: Option<Value>) -> Result<Option<String>, RelayError> {
    match value {
        None => Ok(None),
        Some(Value::String(x)) => Ok(Some(x)),
        Some(_) => Err(invalid(format!("{} must be a string", field))),
    }
}

fn invalid<T: ToString>(msg: T) -> RelayError {
    RelayError::InvalidInput(msg.to_string())
}
