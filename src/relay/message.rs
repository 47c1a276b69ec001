//! Send a validated notification to its destination.
//!
//! | channel_type | Zoom recipient field | threading               |
//! |--------------|----------------------|-------------------------|
//! | `dm`         | `to_contact`         | unsupported, ignored    |
//! | `channel`    | `to_channel`         | `reply_main_message_id` |
//! | `group`      | `to_channel`         | `reply_main_message_id` |

use super::{
    api::ZoomClient,
    auth::AccessToken,
    error::RelayError,
    format::render,
    outcome::check,
    request::{Destination, NotificationRequest},
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// <https://developers.zoom.us/docs/api/team-chat/#tag/chat-messages/POST/chat/users/{userId}/messages>
///
/// Priority and metadata are deliberately absent.
#[skip_serializing_none]
#[derive(Debug, PartialEq, Serialize)]
pub struct MessageRequest<'a> {
    message: String,
    to_contact: Option<&'a str>,
    to_channel: Option<&'a str>,
    reply_main_message_id: Option<&'a str>,
}

/// The ID of the message Zoom created.
#[derive(Deserialize)]
struct MessageResponse {
    id: String,
}

/// Map a notification onto Zoom's message shape, formatting the body.
pub fn build_request(req: &NotificationRequest) -> MessageRequest<'_> {
    let message = render(&req.message, req.format);

    match &req.destination {
        Destination::Contact(id) => MessageRequest {
            message,
            to_contact: Some(id.as_str()),
            to_channel: None,
            reply_main_message_id: None,
        },
        Destination::Channel(id) => MessageRequest {
            message,
            to_contact: None,
            to_channel: Some(id.as_str()),
            reply_main_message_id: req.thread_id.as_deref(),
        },
    }
}

impl ZoomClient {
    /// Post a message as the account's own user, returning Zoom's message ID.
    pub async fn post_message(
        &self,
        req: &NotificationRequest,
        token: &AccessToken,
    ) -> Result<String, RelayError> {
        let res = self
            .post(&["chat", "users", "me", "messages"], token)
            .json(&build_request(req))
            .send()
            .await?;

        let res: MessageResponse = check(res).await?.json().await?;

        Ok(res.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{
        format::Format,
        request::{ChannelType, Priority},
    };
    use serde_json::json;

    fn notification(destination: Destination) -> NotificationRequest {
        NotificationRequest {
            message: "**Deploy** finished".into(),
            channel_type: match destination {
                Destination::Contact(_) => ChannelType::Dm,
                Destination::Channel(_) => ChannelType::Channel,
            },
            destination,
            format: Format::Markdown,
            priority: Priority::High,
            thread_id: Some("thread-1".into()),
            metadata: Some(json!({"k": "v"}).as_object().unwrap().clone()),
        }
    }

    #[test]
    fn test_dm_ignores_thread() {
        let req = notification(Destination::Contact("u@example.com".into()));

        assert_eq!(
            serde_json::to_value(build_request(&req)).unwrap(),
            json!({
                "message": "**Deploy** finished",
                "to_contact": "u@example.com"
            })
        );
    }

    #[test]
    fn test_channel_links_thread() {
        let req = notification(Destination::Channel("chan".into()));

        assert_eq!(
            serde_json::to_value(build_request(&req)).unwrap(),
            json!({
                "message": "**Deploy** finished",
                "to_channel": "chan",
                "reply_main_message_id": "thread-1"
            })
        );
    }

    #[test]
    fn test_channel_without_thread() {
        let mut req = notification(Destination::Channel("chan".into()));
        req.thread_id = None;
        req.format = Format::Plain;

        assert_eq!(
            serde_json::to_value(build_request(&req)).unwrap(),
            json!({
                "message": "Deploy finished",
                "to_channel": "chan"
            })
        );
    }
}
