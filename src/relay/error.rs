use thiserror::Error;

/// Sum type representing every possible unexceptional fail state of a relay
/// request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid JSON payload")]
    MalformedJson,
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Configuration(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// Transport-level failures talking to Zoom. These are never described to
    /// callers.
    #[error("Zoom API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// A non-2xx response from Zoom, classified by status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Rate limited by Zoom API, retry after {retry_after} seconds: {detail}")]
    RateLimited { retry_after: u64, detail: String },
    #[error("Zoom API authentication failed: {0}")]
    Unauthorized(String),
    #[error("Zoom API access forbidden: {0}")]
    Forbidden(String),
    #[error("Recipient or channel not found: {0}")]
    NotFound(String),
    #[error("Zoom API error {status}: {message}")]
    Unknown { status: u16, message: String },
    #[error("Failed to obtain Zoom access token ({status}): {body}")]
    TokenExchange { status: u16, body: String },
}

impl UpstreamError {
    /// Advisory delay in seconds, present only when rate limited.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            UpstreamError::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// A short stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::RateLimited { .. } => "rate_limited",
            UpstreamError::Unauthorized(_) => "unauthorized",
            UpstreamError::Forbidden(_) => "forbidden",
            UpstreamError::NotFound(_) => "not_found",
            UpstreamError::Unknown { .. } => "unknown",
            UpstreamError::TokenExchange { .. } => "token_exchange",
        }
    }
}
