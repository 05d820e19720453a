//! Provider error sanitization helpers

use crate::engine::EngineId;
use crate::error::AulaError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const MAX_ERROR_TEXT_CHARS: usize = 1_024;
const REDACTED: &str = "[REDACTED]";

static BEARER_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bBearer\s+[A-Za-z0-9._\-+/=]{8,}").expect("valid bearer token regex")
});

static INLINE_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(sk-[A-Za-z0-9_\-]{6,}|AIza[0-9A-Za-z_\-]{10,})").expect("valid api key regex")
});

/// Redact secrets and cap the length of a provider error body
pub fn sanitize_provider_error_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "<empty error response body>".to_string();
    }

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        if let Some(message) = extract_error_message(&json) {
            return truncate_with_suffix(redact_inline_secrets(&message));
        }
    }

    truncate_with_suffix(redact_inline_secrets(trimmed))
}

/// `error.message` (OpenAI, Anthropic, Gemini) or a top-level `message`
fn extract_error_message(json: &Value) -> Option<String> {
    json.pointer("/error/message")
        .or_else(|| json.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn redact_inline_secrets(input: &str) -> String {
    let redacted = BEARER_TOKEN_RE.replace_all(input, "Bearer [REDACTED]");
    INLINE_KEY_RE.replace_all(&redacted, REDACTED).into_owned()
}

fn truncate_with_suffix(input: String) -> String {
    let char_count = input.chars().count();
    if char_count <= MAX_ERROR_TEXT_CHARS {
        return input;
    }

    let truncated: String = input.chars().take(MAX_ERROR_TEXT_CHARS).collect();
    format!(
        "{}... [truncated {} chars]",
        truncated,
        char_count - MAX_ERROR_TEXT_CHARS
    )
}

/// Build a provider error from a non-success HTTP response
pub async fn handle_http_error(response: reqwest::Response, engine: EngineId) -> AulaError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AulaError::provider_with_status(
        engine.label(),
        status,
        format!(
            "{} API error: {}",
            engine.profile().provider,
            sanitize_provider_error_text(&body)
        ),
    )
}

/// Build a provider error from a transport failure
pub fn handle_send_error(err: reqwest::Error, engine: EngineId) -> AulaError {
    let message = format!("{} request failed: {}", engine.profile().provider, err);
    match err.status() {
        Some(status) => AulaError::provider_with_status(engine.label(), status.as_u16(), message),
        None => AulaError::provider(engine.label(), message),
    }
}

/// Build a provider error from an unreadable body
pub fn handle_parse_error(err: reqwest::Error, engine: EngineId) -> AulaError {
    AulaError::provider(
        engine.label(),
        format!("Failed to parse {} response: {}", engine.profile().provider, err),
    )
}

/// Build a provider error for a well-formed but unexpected payload
pub fn malformed_response(engine: EngineId, what: &str) -> AulaError {
    AulaError::provider(
        engine.label(),
        format!("Malformed {} response: {}", engine.profile().provider, what),
    )
}

#[cfg(test)]
mod tests {
    use super::sanitize_provider_error_text;

    #[test]
    fn extracts_nested_error_message() {
        let raw = r#"{"error":{"message":"The model `gpt-5-mini` does not exist","type":"invalid_request_error"}}"#;
        assert_eq!(
            sanitize_provider_error_text(raw),
            "The model `gpt-5-mini` does not exist"
        );
    }

    #[test]
    fn redacts_keys_in_plain_text() {
        let raw = "Incorrect API key provided: sk-proj-abcdef123456. Authorization: Bearer abcdefghijkl";
        let sanitized = sanitize_provider_error_text(raw);
        assert!(!sanitized.contains("sk-proj-abcdef123456"));
        assert!(!sanitized.contains("abcdefghijkl"));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn truncates_large_bodies() {
        let raw = "x".repeat(5_000);
        let sanitized = sanitize_provider_error_text(&raw);
        assert!(sanitized.ends_with("[truncated 3976 chars]"));
    }

    #[test]
    fn empty_body_placeholder() {
        assert_eq!(
            sanitize_provider_error_text("  "),
            "<empty error response body>"
        );
    }
}
