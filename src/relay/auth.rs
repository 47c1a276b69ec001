//! Helpers around Zoom's Server-to-Server OAuth.
//!
//! Service credentials are exchanged for a short-lived bearer token with HTTP
//! Basic authentication, and that token then authenticates every onward call.
//!
//! <https://developers.zoom.us/docs/internal-apps/s2s-oauth/>

use base64::{engine::general_purpose::STANDARD as b64, Engine};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// The three secrets configured for the service, borrowed for the duration of
/// a single token exchange.
pub struct Credentials<'a> {
    pub account_id: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a SecretString,
}

/// A newtype wrapper around Zoom access tokens. These are owned by exactly one
/// request and are never persisted.
#[derive(PartialEq, Eq)]
pub struct AccessToken(pub String);

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(..)")
    }
}

/// Convert an access token to a `Bearer` `Authorization` header value.
///
/// ```
/// let token = AccessToken("eyJhbGciOi".into());
/// assert_eq!(to_auth_header_val(&token), "Bearer eyJhbGciOi");
/// ```
pub fn to_auth_header_val(t: &AccessToken) -> String {
    format!("Bearer {}", t.0)
}

/// Convert credentials to a `Basic` `Authorization` header value for the
/// token endpoint.
pub fn to_basic_auth_header_val(c: &Credentials) -> String {
    let raw = format!("{}:{}", c.client_id, c.client_secret.expose_secret());

    format!("Basic {}", b64.encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_auth_header_val() {
        let token = AccessToken("eyJhbGciOi".into());
        assert_eq!(to_auth_header_val(&token), "Bearer eyJhbGciOi");
    }

    #[test]
    fn test_to_basic_auth_header_val() {
        let secret = SecretString::from("secret".to_owned());
        let creds = Credentials {
            account_id: "acct",
            client_id: "client",
            client_secret: &secret,
        };

        assert_eq!(
            to_basic_auth_header_val(&creds),
            "Basic Y2xpZW50OnNlY3JldA=="
        );
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AccessToken("eyJhbGciOi".into());
        assert_eq!(format!("{:?}", token), "AccessToken(..)");
    }
}
