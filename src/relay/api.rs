//! A thin client for the Zoom REST API.

use super::auth::*;
use crate::config::Config;
use url::Url;

/// Holds a connection pool internally, as per [reqwest::Client], along with
/// the locations of the upstream endpoints. Nothing request-specific lives
/// here, so a single instance is shared across all requests.
#[derive(Clone)]
pub struct ZoomClient {
    pub(super) http: reqwest::Client,
    pub(super) api_base: Url,
    pub(super) oauth_url: Url,
}

impl ZoomClient {
    pub fn new(api_base: Url, oauth_url: Url) -> ZoomClient {
        ZoomClient {
            http: reqwest::Client::new(),
            api_base,
            oauth_url,
        }
    }

    pub fn from_config(cfg: &Config) -> ZoomClient {
        ZoomClient::new(cfg.api_base.clone(), cfg.oauth_url.clone())
    }

    /// Build an API URL from path segments, each of which is percent-encoded
    /// as necessary.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();

        // Config rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    /// Create a GET request to any Zoom API endpoint, handling authentication.
    pub fn get(&self, segments: &[&str], token: &AccessToken) -> reqwest::RequestBuilder {
        self.http
            .get(self.endpoint(segments))
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(token))
    }

    /// Create a POST request to any Zoom API endpoint, handling authentication.
    pub fn post(&self, segments: &[&str], token: &AccessToken) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint(segments))
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(token))
    }
}
