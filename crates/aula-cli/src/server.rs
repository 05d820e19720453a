//! HTTP surface: `POST /v1/generate`

use aula_core::anonymize::AnonymizationContext;
use aula_core::engine::{EngineId, TextGenerator};
use aula_core::error::AulaError;
use aula_core::llm::{GenerationOptions, LlmMessage};
use aula_core::orchestrator::{GenerationRequest, Orchestrator};
use aula_core::rate_limit::{OperationClass, SlidingWindowLimiter, enforce};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AppState<G> {
    pub orchestrator: Orchestrator<G>,
    pub limiter: SlidingWindowLimiter,
}

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    /// Engine label, parsed after the rate-limit check
    pub engine: Option<String>,
    pub engines: Option<Vec<String>>,
    pub messages: Vec<LlmMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub student_name: Option<String>,
    /// Token to name, e.g. `{"RESPONSAVEL": "Maria"}`
    #[serde(default)]
    pub aux_names: BTreeMap<String, String>,
    pub workspace_id: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateReply {
    pub text: String,
}

impl GenerateBody {
    /// Parse the engine labels into a selection
    ///
    /// A single unknown label is an error. Unknown labels inside a chain are
    /// skipped; a chain with no known label fails with the last one.
    fn selection(&self) -> Result<Option<Vec<EngineId>>, AulaError> {
        match (&self.engines, &self.engine) {
            (Some(labels), _) if !labels.is_empty() => {
                let mut engines = Vec::with_capacity(labels.len());
                let mut last_error = None;
                for label in labels {
                    match EngineId::from_str(label) {
                        Ok(engine) => engines.push(engine),
                        Err(e) => {
                            info!(engine = %label, "skipping unknown engine in chain");
                            last_error = Some(e);
                        }
                    }
                }
                match (engines.is_empty(), last_error) {
                    (true, Some(e)) => Err(e),
                    _ => Ok(Some(engines)),
                }
            }
            (_, Some(label)) => EngineId::from_str(label).map(|engine| Some(vec![engine])),
            _ => Ok(None),
        }
    }

    fn into_request(self, engines: Option<Vec<EngineId>>) -> GenerationRequest {
        let mut options = GenerationOptions::new();
        options.temperature = self.temperature;
        options.max_tokens = self.max_tokens;
        options.workspace_id = self.workspace_id;
        options.source = self.source;

        let mut request = GenerationRequest::new(self.messages).with_options(options);
        if let Some(engines) = engines {
            request = request.with_engines(engines);
        }

        if self.student_name.is_some() || !self.aux_names.is_empty() {
            let context = self.aux_names.into_iter().fold(
                AnonymizationContext::new(self.student_name.unwrap_or_default()),
                |context, (token, name)| context.with_aux(token, name),
            );
            request = request.with_anonymization(context);
        }
        request
    }
}

pub fn build_app<G: TextGenerator + 'static>(state: Arc<AppState<G>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/generate", post(generate::<G>))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn generate<G: TextGenerator + 'static>(
    State(state): State<Arc<AppState<G>>>,
    headers: HeaderMap,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Response {
    if let Some(rejection) = enforce(&state.limiter, &headers, OperationClass::AiGeneration) {
        return rejection;
    }

    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(status = rejection.status().as_u16(), "malformed generate body");
            return error_response(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    if body.messages.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "messages must not be empty");
    }

    let engines = match body.selection() {
        Ok(engines) => engines,
        Err(e) => return pipeline_error(&e),
    };
    let request = body.into_request(engines);
    match state.orchestrator.generate(&request).await {
        Ok(text) => Json(GenerateReply { text }).into_response(),
        Err(e) => pipeline_error(&e),
    }
}

fn pipeline_error(error: &AulaError) -> Response {
    let status =
        StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    warn!(code = error.error_code(), status = status.as_u16(), error = %error, "generation failed");
    error_response(status, &error.to_string())
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
