//! Gemini single-prompt generation (yellow)

use super::ProviderRequest;
use super::error_utils::{handle_http_error, handle_parse_error, handle_send_error, malformed_response};
use crate::engine::EngineId;
use crate::error::AulaResult;
use crate::llm::LlmMessage;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;

/// Gemini provider handler
///
/// Turns are flattened into one role-tagged prompt for a non-chat
/// `generateContent` call.
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl GeminiProvider {
    pub fn new(base_url: String, api_key: String, http_client: Client) -> Self {
        Self {
            base_url,
            api_key,
            http_client,
        }
    }

    /// `"System: ...\n\nUser: ..."`
    pub fn flatten_prompt(messages: &[LlmMessage]) -> String {
        messages
            .iter()
            .map(|m| format!("{}: {}", m.role.prompt_label(), m.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn build_request_body(request: &ProviderRequest<'_>) -> Value {
        let mut generation_config = json!({ "temperature": request.temperature });
        if let Some(max_tokens) = request.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }

        json!({
            "contents": [{ "parts": [{ "text": Self::flatten_prompt(request.messages) }] }],
            "generationConfig": generation_config,
        })
    }

    /// Text of the first candidate, parts concatenated
    pub fn parse_response(response: &Value) -> AulaResult<String> {
        let Some(parts) = response
            .pointer("/candidates/0/content/parts")
            .and_then(Value::as_array)
        else {
            let reason = response
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str)
                .map(|r| format!("prompt blocked ({})", r))
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(malformed_response(EngineId::Yellow, &reason));
        };

        Ok(parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<String>())
    }

    #[instrument(skip(self, request), fields(model = request.model), level = "debug")]
    pub async fn complete(&self, request: ProviderRequest<'_>) -> AulaResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            request.model
        );
        let body = Self::build_request_body(&request);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| handle_send_error(e, EngineId::Yellow))?;

        if !response.status().is_success() {
            return Err(handle_http_error(response, EngineId::Yellow).await);
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| handle_parse_error(e, EngineId::Yellow))?;

        Self::parse_response(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_prompt() {
        let messages = vec![
            LlmMessage::system("Seja breve."),
            LlmMessage::user("Resuma."),
            LlmMessage::assistant("Ok."),
        ];
        assert_eq!(
            GeminiProvider::flatten_prompt(&messages),
            "System: Seja breve.\n\nUser: Resuma.\n\nAssistant: Ok."
        );
    }

    #[test]
    fn test_request_body_has_single_text_part() {
        let messages = vec![LlmMessage::system("a"), LlmMessage::user("b")];
        let request = ProviderRequest {
            model: "gemini-2.0-flash",
            messages: &messages,
            temperature: 0.5,
            max_tokens: Some(256),
        };
        let body = GeminiProvider::build_request_body(&request);
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "System: a\n\nUser: b");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
    }

    #[test]
    fn test_parse_concatenates_parts() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"questoes\":" }, { "text": "[]}" }] } }]
        });
        assert_eq!(
            GeminiProvider::parse_response(&response).unwrap(),
            "{\"questoes\":[]}"
        );
    }

    #[test]
    fn test_blocked_prompt_is_reported() {
        let response = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = GeminiProvider::parse_response(&response).unwrap_err();
        assert!(err.to_string().contains("prompt blocked (SAFETY)"));
    }
}
