//! HTTP boundary for rate limiting

use super::types::{OperationClass, RateLimitOutcome};
use super::window::SlidingWindowLimiter;
use axum::Json;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

const UNKNOWN_CALLER: &str = "unknown";

/// Caller identity from the first `x-forwarded-for` entry, else `"unknown"`
pub fn caller_identity(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|raw| raw.to_str().ok())
        .and_then(|raw| raw.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .unwrap_or(UNKNOWN_CALLER)
        .to_string()
}

/// Window key for a caller under an operation class
pub fn rate_limit_key(class: OperationClass, caller: &str) -> String {
    format!("{}:{}", class.prefix(), caller)
}

/// Gate a request: `None` lets the pipeline continue, `Some` is a terminal 429
pub fn enforce(
    limiter: &SlidingWindowLimiter,
    headers: &HeaderMap,
    class: OperationClass,
) -> Option<Response> {
    let key = rate_limit_key(class, &caller_identity(headers));
    let outcome = limiter.check(&key, class.config());
    if outcome.success {
        None
    } else {
        Some(too_many_requests(&outcome))
    }
}

/// 429 response carrying `Retry-After` and `X-RateLimit-Remaining: 0`
pub fn too_many_requests(outcome: &RateLimitOutcome) -> Response {
    let retry_after = outcome.retry_after_secs();
    let body = Json(json!({
        "error": format!(
            "Muitas requisições. Tente novamente em {} segundos.",
            retry_after
        ),
    }));

    let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
    let headers = response.headers_mut();
    headers.insert("retry-after", HeaderValue::from(retry_after));
    headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
    response
}
