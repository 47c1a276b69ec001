//! Translate raw Zoom responses into a stable outcome.
//!
//! | Zoom status | Outcome                                  |
//! |-------------|------------------------------------------|
//! | 2xx         | success, body handed back for decoding   |
//! | 429         | [UpstreamError::RateLimited]             |
//! | 401         | [UpstreamError::Unauthorized]            |
//! | 403         | [UpstreamError::Forbidden]               |
//! | 404         | [UpstreamError::NotFound]                |
//! | other       | [UpstreamError::Unknown]                 |

use super::error::{RelayError, UpstreamError};
use reqwest::{header::RETRY_AFTER, StatusCode};
use serde::Deserialize;

/// Used when a 429 response doesn't say how long to wait.
pub const DEFAULT_RETRY_AFTER: u64 = 60;

/// Zoom's error responses carry a numeric code and a description.
///
/// ```json
/// {
///     "code": 1001,
///     "message": "User does not exist: foo@example.com."
/// }
/// ```
#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Pass successful responses through, consuming anything else into an
/// [UpstreamError].
pub async fn check(res: reqwest::Response) -> Result<reqwest::Response, RelayError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let retry_after = res
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = res.text().await?;

    Err(classify(status, retry_after.as_deref(), &body).into())
}

/// Classify a non-2xx response.
pub fn classify(status: StatusCode, retry_after: Option<&str>, body: &str) -> UpstreamError {
    let detail = error_detail(body);

    match status {
        StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited {
            retry_after: parse_retry_after(retry_after),
            detail,
        },
        StatusCode::UNAUTHORIZED => UpstreamError::Unauthorized(detail),
        StatusCode::FORBIDDEN => UpstreamError::Forbidden(detail),
        StatusCode::NOT_FOUND => UpstreamError::NotFound(detail),
        _ => UpstreamError::Unknown {
            status: status.as_u16(),
            message: detail,
        },
    }
}

/// `Retry-After` as whole seconds. HTTP-dates and garbage fall back to
/// [DEFAULT_RETRY_AFTER].
pub fn parse_retry_after(raw: Option<&str>) -> u64 {
    raw.and_then(|x| x.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER)
}

/// Prefer Zoom's own description of the error, falling back to the raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_classify() {
        let body = r#"{"code": 1001, "message": "User does not exist: foo."}"#;

        assert_eq!(
            classify(
                StatusCode::TOO_MANY_REQUESTS,
                Some("30"),
                r#"{"code": 429, "message": "You have exceeded the daily rate limit."}"#
            ),
            UpstreamError::RateLimited {
                retry_after: 30,
                detail: "You have exceeded the daily rate limit.".into()
            }
        );
        assert_eq!(
            classify(StatusCode::UNAUTHORIZED, None, "Invalid access token."),
            UpstreamError::Unauthorized("Invalid access token.".into())
        );
        assert_eq!(
            classify(StatusCode::FORBIDDEN, None, body),
            UpstreamError::Forbidden("User does not exist: foo.".into())
        );
        assert_eq!(
            classify(StatusCode::NOT_FOUND, None, body),
            UpstreamError::NotFound("User does not exist: foo.".into())
        );
        assert_eq!(
            classify(StatusCode::BAD_REQUEST, None, body),
            UpstreamError::Unknown {
                status: 400,
                message: "User does not exist: foo.".into()
            }
        );
    }

    #[test]
    fn test_not_found_mentions_not_found() {
        let e = classify(StatusCode::NOT_FOUND, None, "");
        assert!(e.to_string().contains("not found"));
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after(Some("60")), 60);
        assert_eq!(parse_retry_after(Some(" 5 ")), 5);
        assert_eq!(parse_retry_after(None), DEFAULT_RETRY_AFTER);
        assert_eq!(parse_retry_after(Some("soon")), DEFAULT_RETRY_AFTER);
        assert_eq!(parse_retry_after(Some("-1")), DEFAULT_RETRY_AFTER);
        assert_eq!(
            parse_retry_after(Some("Wed, 21 Oct 2015 07:28:00 GMT")),
            DEFAULT_RETRY_AFTER
        );
    }

    quickcheck! {
        fn test_parse_retry_after_roundtrips_seconds(x: u64) -> bool {
            parse_retry_after(Some(&x.to_string())) == x
        }

        fn test_parse_retry_after_never_panics(x: String) -> () {
            parse_retry_after(Some(&x));
        }
    }
}
