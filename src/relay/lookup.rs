//! Check that a user or channel is reachable before anything is sent to it.
//!
//! Lookups are read-only on Zoom's side, so repeating one is always safe.

use super::{
    api::ZoomClient,
    auth::AccessToken,
    error::RelayError,
    outcome::check,
    request::{ChannelType, Destination, ValidationRequest},
};

/// The API path which describes a destination.
///
/// - <https://developers.zoom.us/docs/api/users/#tag/users/GET/users/{userId}>
/// - <https://developers.zoom.us/docs/api/team-chat/#tag/chat-channels/GET/chat/users/{userId}/channels/{channelId}>
fn lookup_path(destination: &Destination) -> Vec<&str> {
    match destination {
        Destination::Contact(id) => vec!["users", id.as_str()],
        Destination::Channel(id) => vec!["chat", "users", "me", "channels", id.as_str()],
    }
}

impl ZoomClient {
    /// Succeeds iff Zoom can describe the destination. The response body
    /// itself is of no interest.
    pub async fn lookup(
        &self,
        destination: &Destination,
        token: &AccessToken,
    ) -> Result<(), RelayError> {
        let res = self.get(&lookup_path(destination), token).send().await?;
        check(res).await?;

        Ok(())
    }
}

/// The caller-facing description of a successful lookup.
pub fn describe_valid(req: &ValidationRequest) -> String {
    let (noun, id) = match (&req.channel_type, &req.destination) {
        (ChannelType::Dm, Destination::Contact(id)) => ("User", id),
        (ChannelType::Group, Destination::Channel(id)) => ("Group", id),
        (_, Destination::Contact(id)) | (_, Destination::Channel(id)) => ("Channel", id),
    };

    format!("{} {} is valid", noun, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_path() {
        assert_eq!(
            lookup_path(&Destination::Contact("u@example.com".into())),
            vec!["users", "u@example.com"]
        );
        assert_eq!(
            lookup_path(&Destination::Channel("abc".into())),
            vec!["chat", "users", "me", "channels", "abc"]
        );
    }

    #[test]
    fn test_describe_valid() {
        let dm = ValidationRequest {
            channel_type: ChannelType::Dm,
            destination: Destination::Contact("u".into()),
        };
        let group = ValidationRequest {
            channel_type: ChannelType::Group,
            destination: Destination::Channel("g".into()),
        };
        let channel = ValidationRequest {
            channel_type: ChannelType::Channel,
            destination: Destination::Channel("c".into()),
        };

        assert_eq!(describe_valid(&dm), "User u is valid");
        assert_eq!(describe_valid(&group), "Group g is valid");
        assert_eq!(describe_valid(&channel), "Channel c is valid");
    }
}
