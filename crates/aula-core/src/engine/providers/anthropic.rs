//! Anthropic messages API (green)

use super::ProviderRequest;
use super::error_utils::{handle_http_error, handle_parse_error, handle_send_error, malformed_response};
use crate::engine::EngineId;
use crate::error::AulaResult;
use crate::llm::MessageRole;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic requires `max_tokens`
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic provider handler
pub struct AnthropicProvider {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl AnthropicProvider {
    pub fn new(base_url: String, api_key: String, http_client: Client) -> Self {
        Self {
            base_url,
            api_key,
            http_client,
        }
    }

    /// System turns go to the top-level `system` field, the rest to `messages`
    pub fn build_request_body(request: &ProviderRequest<'_>) -> Value {
        let system = request
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let messages: Vec<Value> = request
            .messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| json!({ "role": m.role.to_string(), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": request.model,
            "messages": messages,
            "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "temperature": request.temperature,
        });
        if !system.is_empty() {
            body["system"] = json!(system);
        }
        body
    }

    /// First `text` block of the `content` array
    pub fn parse_response(response: &Value) -> AulaResult<String> {
        response
            .get("content")
            .and_then(Value::as_array)
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            })
            .and_then(|block| block.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| malformed_response(EngineId::Green, "no text content block"))
    }

    #[instrument(skip(self, request), fields(model = request.model), level = "debug")]
    pub async fn complete(&self, request: ProviderRequest<'_>) -> AulaResult<String> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        let body = Self::build_request_body(&request);

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| handle_send_error(e, EngineId::Green))?;

        if !response.status().is_success() {
            return Err(handle_http_error(response, EngineId::Green).await);
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| handle_parse_error(e, EngineId::Green))?;

        Self::parse_response(&json)
    }
}
