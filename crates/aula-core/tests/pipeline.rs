//! End-to-end tests against a local fake provider server

use aula_core::config::{EnvSource, PipelineConfig, TimeoutConfig};
use aula_core::engine::{CredentialResolver, EngineId, EngineRouter};
use aula_core::orchestrator::{GenerationRequest, Orchestrator};
use aula_core::usage::{MemoryUsageSink, UsageTracker};
use aula_core::validation::{DiagnosticValidator, Profile};
use aula_core::{AnonymizationContext, AulaError, GenerationOptions, LlmMessage};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Captured {
    path: String,
    auth: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Captured>>>;

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn last_user_text(body: &Value) -> String {
    body["messages"]
        .as_array()
        .and_then(|messages| messages.iter().rev().find(|m| m["role"] == "user"))
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default()
        .to_string()
}

async fn chat_completions(State(log): State<Log>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    log.lock().push(Captured {
        path: "/chat/completions".into(),
        auth: header(&headers, "authorization"),
        body: body.clone(),
    });

    match body["model"].as_str() {
        Some("missing-model") => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "The model `missing-model` does not exist" } })),
        )
            .into_response(),
        Some("broken-model") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream failure for key sk-live-abcdef123456",
        )
            .into_response(),
        _ => Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": format!("Eco: {}", last_user_text(&body)) } }]
        }))
        .into_response(),
    }
}

async fn messages(State(log): State<Log>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    log.lock().push(Captured {
        path: "/v1/messages".into(),
        auth: header(&headers, "x-api-key"),
        body: body.clone(),
    });
    if header(&headers, "anthropic-version").as_deref() != Some("2023-06-01") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(json!({ "content": [{ "type": "text", "text": format!("Claude: {}", last_user_text(&body)) }] }))
        .into_response()
}

async fn generate_content(
    State(log): State<Log>,
    Path(target): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    log.lock().push(Captured {
        path: format!("/v1beta/models/{}", target),
        auth: header(&headers, "x-goog-api-key"),
        body,
    });
    Json(json!({
        "candidates": [{ "content": { "parts": [{ "text": "{\"questoes\": " }, { "text": "[]}" }] } }]
    }))
    .into_response()
}

async fn spawn_provider() -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/chat/completions", post(chat_completions))
        .route("/v1/messages", post(messages))
        .route("/v1beta/models/:target", post(generate_content))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), log)
}

fn router(base: &str, extra: &[(&str, &str)], sink: Arc<MemoryUsageSink>) -> EngineRouter {
    let mut vars: Vec<(String, String)> = vec![
        ("OPENAI_API_KEY".into(), "sk-test-openai".into()),
        ("OPENAI_BASE_URL".into(), base.into()),
        ("ANTHROPIC_API_KEY".into(), "sk-ant-test".into()),
        ("ANTHROPIC_BASE_URL".into(), base.into()),
        ("GEMINI_API_KEY".into(), "AIza-test".into()),
        ("GEMINI_BASE_URL".into(), base.into()),
        ("DEEPSEEK_BASE_URL".into(), base.into()),
    ];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    EngineRouter::new(
        TimeoutConfig::new(5, 10),
        CredentialResolver::new(EnvSource::fixed(vars)),
        UsageTracker::new(sink),
    )
    .unwrap()
}

async fn wait_for_events(sink: &MemoryUsageSink, count: usize) {
    for _ in 0..100 {
        if sink.events().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_orange_speaks_openai_chat() {
    let (base, log) = spawn_provider().await;
    let sink = Arc::new(MemoryUsageSink::new());
    let router = router(&base, &[], sink.clone());

    let text = router
        .dispatch(
            EngineId::Orange,
            &[LlmMessage::system("Seja breve."), LlmMessage::user("Olá")],
            &GenerationOptions::new().with_workspace("ws-1").with_source("pei"),
        )
        .await
        .unwrap();
    assert_eq!(text, "Eco: Olá");

    let captured = log.lock()[0].clone();
    assert_eq!(captured.auth.as_deref(), Some("Bearer sk-test-openai"));
    assert_eq!(captured.body["model"], "gpt-4o-mini");
    assert_eq!(captured.body["messages"][0]["role"], "system");

    wait_for_events(&sink, 1).await;
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].engine_id, EngineId::Orange);
    assert_eq!(events[0].workspace_id.as_deref(), Some("ws-1"));
    assert_eq!(events[0].credits_consumed, None);
}

#[tokio::test]
async fn test_green_separates_system_and_reports_credits() {
    let (base, log) = spawn_provider().await;
    let sink = Arc::new(MemoryUsageSink::new());
    let router = router(&base, &[], sink.clone());

    let text = router
        .dispatch(
            EngineId::Green,
            &[LlmMessage::system("Regras"), LlmMessage::user("Plano")],
            &GenerationOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(text, "Claude: Plano");

    let captured = log.lock()[0].clone();
    assert_eq!(captured.auth.as_deref(), Some("sk-ant-test"));
    assert_eq!(captured.body["system"], "Regras");
    assert_eq!(captured.body["max_tokens"], 4096);

    wait_for_events(&sink, 1).await;
    assert_eq!(sink.events()[0].credits_consumed, Some(3));
    assert_eq!(sink.summary().credits, 3);
}

#[tokio::test]
async fn test_yellow_flattens_prompt() {
    let (base, log) = spawn_provider().await;
    let router = router(&base, &[], Arc::new(MemoryUsageSink::new()));

    let text = router
        .dispatch(
            EngineId::Yellow,
            &[LlmMessage::system("S"), LlmMessage::user("U")],
            &GenerationOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(text, "{\"questoes\": []}");

    let captured = log.lock()[0].clone();
    assert_eq!(captured.path, "/v1beta/models/gemini-2.0-flash:generateContent");
    assert_eq!(captured.auth.as_deref(), Some("AIza-test"));
    assert_eq!(captured.body["contents"][0]["parts"][0]["text"], "System: S\n\nUser: U");
}

#[tokio::test]
async fn test_model_fallback_skips_missing_model() {
    let (base, log) = spawn_provider().await;
    let router = router(&base, &[], Arc::new(MemoryUsageSink::new()));

    let models = vec!["missing-model".to_string(), "gpt-4o".to_string()];
    let text = router
        .dispatch_models(EngineId::Orange, &models, &[LlmMessage::user("oi")], &GenerationOptions::new())
        .await
        .unwrap();

    assert_eq!(text, "Eco: oi");
    let log = log.lock();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].body["model"], "gpt-4o");
}

#[tokio::test]
async fn test_provider_error_carries_status_and_redacts_secrets() {
    let (base, _) = spawn_provider().await;
    let router = router(&base, &[], Arc::new(MemoryUsageSink::new()));

    let err = router
        .dispatch(
            EngineId::Orange,
            &[LlmMessage::user("oi")],
            &GenerationOptions::new().with_model("broken-model"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AulaError::Provider { status: Some(500), .. }));
    assert!(!err.to_string().contains("sk-live-abcdef123456"));
}

#[tokio::test]
async fn test_orchestrated_chain_with_anonymization() {
    let (base, log) = spawn_provider().await;
    let sink = Arc::new(MemoryUsageSink::new());
    let router = router(&base, &[], sink.clone());
    let orchestrator = Orchestrator::new(router, PipelineConfig::default());

    let request = GenerationRequest::new(vec![LlmMessage::user("Atividade para Beatriz Souza")])
        .with_engines(vec![EngineId::Red, EngineId::Orange])
        .with_anonymization(AnonymizationContext::new("Beatriz Souza"));

    let text = orchestrator.generate(&request).await.unwrap();
    assert_eq!(text, "Eco: Atividade para Beatriz Souza");

    let log = log.lock();
    assert_eq!(log.len(), 1, "red has no key and never reaches the network");
    assert_eq!(last_user_text(&log[0].body), "Atividade para [ESTUDANTE]");
}

#[tokio::test]
async fn test_validated_generation_exhausts_on_empty_set() {
    let (base, log) = spawn_provider().await;
    let router = router(&base, &[], Arc::new(MemoryUsageSink::new()));
    let orchestrator = Orchestrator::new(router, PipelineConfig::default());
    let validator = DiagnosticValidator::new(Profile::Tea, 2);

    let request = GenerationRequest::new(vec![LlmMessage::user("Gere questões")])
        .with_engine(EngineId::Yellow);
    let err = orchestrator
        .generate_validated(&request, |value| validator.validate(value), Some(1))
        .await
        .unwrap_err();

    assert!(matches!(err, AulaError::ValidationExhausted { attempts: 2, .. }));
    assert_eq!(log.lock().len(), 2);
}
