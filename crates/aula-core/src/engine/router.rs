//! Engine router: credential, endpoint and provider call for one engine

use super::credential::CredentialResolver;
use super::generator::TextGenerator;
use super::id::EngineId;
use super::profile::WireShape;
use super::providers::{
    AnthropicProvider, GeminiProvider, OpenAiCompatProvider, ProviderInstance, ProviderRequest,
};
use crate::config::{EnvSource, TimeoutConfig};
use crate::error::{AulaError, AulaResult};
use crate::llm::{GenerationOptions, LlmMessage};
use crate::orchestrator::first_available;
use crate::usage::{UsageEvent, UsageTracker};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

/// Concrete target of one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEndpoint {
    pub base_url: String,
    pub model: String,
}

/// Dispatches messages to the provider behind an engine
///
/// One HTTP client is shared by every call; its timeouts are the only ones
/// in the pipeline. The router never retries.
#[derive(Debug, Clone)]
pub struct EngineRouter {
    http_client: Client,
    credentials: CredentialResolver,
    usage: UsageTracker,
}

impl EngineRouter {
    pub fn new(
        timeouts: TimeoutConfig,
        credentials: CredentialResolver,
        usage: UsageTracker,
    ) -> AulaResult<Self> {
        timeouts
            .validate()
            .map_err(|e| AulaError::config_with_context(e, "Building engine HTTP client"))?;

        let http_client = Client::builder()
            .connect_timeout(timeouts.connection_timeout())
            .timeout(timeouts.request_timeout())
            .build()
            .map_err(|e| AulaError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            credentials,
            usage,
        })
    }

    /// Router over the process environment with log-only usage tracking
    pub fn from_env(timeouts: TimeoutConfig) -> AulaResult<Self> {
        Self::new(
            timeouts,
            CredentialResolver::new(EnvSource::Process),
            UsageTracker::tracing(),
        )
    }

    pub fn credentials(&self) -> &CredentialResolver {
        &self.credentials
    }

    /// Credential for `engine`; errors before any network call
    pub fn resolve_credential(
        &self,
        engine: EngineId,
        key_override: Option<&str>,
    ) -> AulaResult<String> {
        self.credentials.resolve(engine, key_override)
    }

    /// Base URL and model, honoring `*_BASE_URL` / `*_MODEL` overrides
    pub fn endpoint(&self, engine: EngineId, model: Option<&str>) -> EngineEndpoint {
        let profile = engine.profile();
        let env = self.credentials.env();

        let base_url = env
            .get(profile.base_url_env)
            .unwrap_or_else(|| profile.base_url.to_string());
        let model = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| env.get(profile.model_env))
            .unwrap_or_else(|| profile.default_model.to_string());

        EngineEndpoint { base_url, model }
    }

    fn provider(&self, engine: EngineId, base_url: String, api_key: String) -> ProviderInstance {
        let client = self.http_client.clone();
        match engine.profile().wire {
            WireShape::OpenAiChat => ProviderInstance::OpenAiCompat(OpenAiCompatProvider::new(
                engine, base_url, api_key, client,
            )),
            WireShape::AnthropicMessages => {
                ProviderInstance::Anthropic(AnthropicProvider::new(base_url, api_key, client))
            }
            WireShape::GeminiGenerate => {
                ProviderInstance::Gemini(GeminiProvider::new(base_url, api_key, client))
            }
        }
    }

    /// Send `messages` to `engine` and return its text
    #[instrument(skip(self, messages, options), fields(engine = %engine, messages = messages.len()))]
    pub async fn dispatch(
        &self,
        engine: EngineId,
        messages: &[LlmMessage],
        options: &GenerationOptions,
    ) -> AulaResult<String> {
        let api_key = self.resolve_credential(engine, options.api_key.as_deref())?;
        let endpoint = self.endpoint(engine, options.model.as_deref());
        debug!(model = %endpoint.model, base_url = %endpoint.base_url, "dispatching");

        let request = ProviderRequest {
            model: &endpoint.model,
            messages,
            temperature: options
                .temperature
                .unwrap_or(engine.profile().default_temperature),
            max_tokens: options.max_tokens,
        };

        let provider = self.provider(engine, endpoint.base_url.clone(), api_key);
        let text = provider.complete(request).await?;

        if !text.trim().is_empty() {
            self.record_usage(engine, options);
        }
        Ok(text)
    }

    /// Dispatch trying `models` in order on one engine
    pub async fn dispatch_models(
        &self,
        engine: EngineId,
        models: &[String],
        messages: &[LlmMessage],
        options: &GenerationOptions,
    ) -> AulaResult<String> {
        first_available(models, move |model: &String| {
            let options = options.clone().with_model(model.clone());
            async move { self.dispatch(engine, messages, &options).await }
        })
        .await
    }

    fn record_usage(&self, engine: EngineId, options: &GenerationOptions) {
        let event = UsageEvent::new(engine)
            .with_workspace(options.workspace_id.clone())
            .with_source(options.source.clone());
        let _ = self.usage.track(event);
    }
}

#[async_trait]
impl TextGenerator for EngineRouter {
    async fn generate(
        &self,
        engine: EngineId,
        messages: &[LlmMessage],
        options: &GenerationOptions,
    ) -> AulaResult<String> {
        self.dispatch(engine, messages, options).await
    }

    async fn generate_with_models(
        &self,
        engine: EngineId,
        models: &[String],
        messages: &[LlmMessage],
        options: &GenerationOptions,
    ) -> AulaResult<String> {
        self.dispatch_models(engine, models, messages, options).await
    }
}
