//! Seam between the orchestrator and engine dispatch

use super::id::EngineId;
use crate::error::AulaResult;
use crate::llm::{GenerationOptions, LlmMessage};
use async_trait::async_trait;

/// Anything that can turn messages into text on a given engine
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text on `engine`
    async fn generate(
        &self,
        engine: EngineId,
        messages: &[LlmMessage],
        options: &GenerationOptions,
    ) -> AulaResult<String>;

    /// Generate text trying `models` in order on one engine
    ///
    /// The default ignores the list and uses the engine's configured model.
    async fn generate_with_models(
        &self,
        engine: EngineId,
        models: &[String],
        messages: &[LlmMessage],
        options: &GenerationOptions,
    ) -> AulaResult<String> {
        let _ = models;
        self.generate(engine, messages, options).await
    }
}
