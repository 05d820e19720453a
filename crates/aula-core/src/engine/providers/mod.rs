//! Provider-specific wire implementations

pub mod anthropic;
pub mod error_utils;
pub mod gemini;
pub mod openai_compat;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai_compat::OpenAiCompatProvider;

use crate::error::AulaResult;
use crate::llm::LlmMessage;

/// Normalized inputs for one provider call
#[derive(Debug, Clone, Copy)]
pub struct ProviderRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [LlmMessage],
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// Unified provider enum selected by wire shape
pub enum ProviderInstance {
    OpenAiCompat(OpenAiCompatProvider),
    Anthropic(AnthropicProvider),
    Gemini(GeminiProvider),
}

impl ProviderInstance {
    /// Perform the call and return the provider's text
    pub async fn complete(&self, request: ProviderRequest<'_>) -> AulaResult<String> {
        match self {
            Self::OpenAiCompat(p) => p.complete(request).await,
            Self::Anthropic(p) => p.complete(request).await,
            Self::Gemini(p) => p.complete(request).await,
        }
    }
}
