//! OpenAI-compatible chat completions (orange, red, blue)

use super::ProviderRequest;
use super::error_utils::{handle_http_error, handle_parse_error, handle_send_error, malformed_response};
use crate::engine::EngineId;
use crate::error::AulaResult;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;

/// One chat schema reused by several engines; only base URL and model differ
pub struct OpenAiCompatProvider {
    engine: EngineId,
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl OpenAiCompatProvider {
    pub fn new(engine: EngineId, base_url: String, api_key: String, http_client: Client) -> Self {
        Self {
            engine,
            base_url,
            api_key,
            http_client,
        }
    }

    /// Request body for `POST /chat/completions`
    pub fn build_request_body(request: &ProviderRequest<'_>) -> Value {
        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|m| json!({ "role": m.role.to_string(), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": request.model,
            "messages": messages,
            "temperature": request.temperature,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }

    /// `choices[0].message.content`
    pub fn parse_response(engine: EngineId, response: &Value) -> AulaResult<String> {
        response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| malformed_response(engine, "missing choices[0].message.content"))
    }

    #[instrument(skip(self, request), fields(engine = %self.engine, model = request.model), level = "debug")]
    pub async fn complete(&self, request: ProviderRequest<'_>) -> AulaResult<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = Self::build_request_body(&request);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| handle_send_error(e, self.engine))?;

        if !response.status().is_success() {
            return Err(handle_http_error(response, self.engine).await);
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| handle_parse_error(e, self.engine))?;

        Self::parse_response(self.engine, &json)
    }
}
