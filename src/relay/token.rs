//! Exchange service credentials for a bearer token.
//!
//! A new token is requested for every relayed request. There is no cache and
//! no internal retry; one exchange attempt per caller request.

use super::{api::ZoomClient, auth::*, error::*};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// <https://developers.zoom.us/docs/internal-apps/s2s-oauth/#use-account-credentials-to-get-an-access-token>
#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    account_id: &'a str,
}

/// Only the token itself matters to us; `expires_in` is irrelevant without
/// caching.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ZoomClient {
    /// Request a fresh access token. Non-2xx responses surface Zoom's body as
    /// [UpstreamError::TokenExchange].
    pub async fn fetch_token(&self, creds: &Credentials<'_>) -> Result<AccessToken, RelayError> {
        let res = self
            .http
            .post(self.oauth_url.clone())
            .header(
                reqwest::header::AUTHORIZATION,
                to_basic_auth_header_val(creds),
            )
            .query(&TokenRequest {
                grant_type: "account_credentials",
                account_id: creds.account_id,
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;

            return Err(UpstreamError::TokenExchange {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let res: TokenResponse = res.json().await?;
        debug!("Obtained Zoom access token");

        Ok(AccessToken(res.access_token))
    }
}
