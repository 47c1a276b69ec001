//! Relay subrouter definition.
//!
//! The following subroutes are supported:
//!
//! - POST: `/notify`
//! - POST: `/validate`

use super::{
    error::RelayError,
    lookup::describe_valid,
    request::{parse_notification, parse_validation, NotificationRequest},
};
use crate::router::{timestamp, Deps};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_with::skip_serializing_none;
use tracing::{error, info, warn};

/// Never leaks any detail of what went wrong.
const INTERNAL_ERROR: &str = "Internal server error";

/// Instantiate a new relay subrouter.
pub fn relay_router() -> Router<Deps> {
    Router::new()
        .route("/notify", post(notify_handler))
        .route("/validate", post(validate_handler))
}

#[skip_serializing_none]
#[derive(Serialize)]
struct NotifyResponse {
    success: bool,
    message_id: Option<String>,
    delivered_at: Option<String>,
    error: Option<String>,
    retry_after: Option<u64>,
}

#[skip_serializing_none]
#[derive(Serialize)]
struct ValidateResponse {
    valid: bool,
    message: Option<String>,
    error: Option<String>,
}

/// Handler for the POST subroute `/notify`.
///
/// Accepts a notification in `application/json` format. The body is read
/// raw so that unparsable JSON can be reported in the same shape as every
/// other failure.
async fn notify_handler(State(deps): State<Deps>, body: Bytes) -> Response {
    match notify(&deps, &body).await {
        Ok(message_id) => {
            let res = NotifyResponse {
                success: true,
                message_id: Some(message_id),
                delivered_at: Some(timestamp()),
                error: None,
                retry_after: None,
            };

            (StatusCode::OK, Json(res)).into_response()
        }
        Err(e) => notify_failure(&e),
    }
}

/// One token exchange and one send per call.
async fn notify(deps: &Deps, body: &[u8]) -> Result<String, RelayError> {
    let req: NotificationRequest = parse_notification(body)?;
    let creds = deps.config.credentials()?;

    let token = deps.client.fetch_token(&creds).await?;
    let message_id = deps.client.post_message(&req, &token).await?;

    info!(
        channel_type = %req.channel_type,
        priority = ?req.priority,
        metadata_fields = req.metadata.as_ref().map_or(0, |m| m.len()),
        message_id = %message_id,
        "Delivered notification"
    );

    Ok(message_id)
}

fn notify_failure(e: &RelayError) -> Response {
    let (code, retry_after) = match e {
        RelayError::MalformedJson | RelayError::InvalidInput(_) => (StatusCode::BAD_REQUEST, None),
        RelayError::Configuration(_) => (StatusCode::BAD_GATEWAY, None),
        RelayError::Upstream(u) => (StatusCode::BAD_GATEWAY, u.retry_after()),
        RelayError::RequestFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
    };

    log_failure(e);

    let res = NotifyResponse {
        success: false,
        message_id: None,
        delivered_at: None,
        error: Some(public_message(e)),
        retry_after,
    };

    (code, Json(res)).into_response()
}

/// Handler for the POST subroute `/validate`.
///
/// Accepts a destination in `application/json` format. An unreachable
/// destination is an expected answer rather than a failure, so upstream
/// errors are reported with a 200.
async fn validate_handler(State(deps): State<Deps>, body: Bytes) -> Response {
    match validate(&deps, &body).await {
        Ok(message) => {
            let res = ValidateResponse {
                valid: true,
                message: Some(message),
                error: None,
            };

            (StatusCode::OK, Json(res)).into_response()
        }
        Err(e) => validate_failure(&e),
    }
}

async fn validate(deps: &Deps, body: &[u8]) -> Result<String, RelayError> {
    let req = parse_validation(body)?;
    let creds = deps.config.credentials()?;

    let token = deps.client.fetch_token(&creds).await?;
    deps.client.lookup(&req.destination, &token).await?;

    info!(channel_type = %req.channel_type, "Validated destination");

    Ok(describe_valid(&req))
}

fn validate_failure(e: &RelayError) -> Response {
    let code = match e {
        RelayError::MalformedJson
        | RelayError::InvalidInput(_)
        | RelayError::Configuration(_) => StatusCode::BAD_REQUEST,
        RelayError::Upstream(_) => StatusCode::OK,
        RelayError::RequestFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    log_failure(e);

    let res = ValidateResponse {
        valid: false,
        message: None,
        error: Some(public_message(e)),
    };

    (code, Json(res)).into_response()
}

fn public_message(e: &RelayError) -> String {
    match e {
        RelayError::RequestFailed(_) => INTERNAL_ERROR.to_owned(),
        _ => e.to_string(),
    }
}

fn log_failure(e: &RelayError) {
    match e {
        RelayError::MalformedJson | RelayError::InvalidInput(_) => {
            info!(error = %e, "Rejected request")
        }
        RelayError::Configuration(_) => error!(error = %e, "Relay is misconfigured"),
        RelayError::Upstream(u) => warn!(kind = u.kind(), error = %e, "Zoom API returned an error"),
        RelayError::RequestFailed(_) => error!(error = ?e, "Zoom API request failed"),
    }
}
