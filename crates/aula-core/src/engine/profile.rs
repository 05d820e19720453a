//! Static per-engine provider profiles

use super::id::EngineId;

/// Request framing spoken by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireShape {
    /// `POST /chat/completions`, result in `choices[0].message.content`
    OpenAiChat,
    /// `POST /v1/messages` with a separate `system` field
    AnthropicMessages,
    /// Single flattened prompt to `:generateContent`
    GeminiGenerate,
}

/// Immutable description of one engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineProfile {
    pub engine: EngineId,
    /// Human-readable provider name
    pub provider: &'static str,
    /// Credential variables in priority order
    pub key_env_vars: &'static [&'static str],
    pub base_url: &'static str,
    pub base_url_env: &'static str,
    pub default_model: &'static str,
    pub model_env: &'static str,
    pub default_temperature: f32,
    pub supports_vision: bool,
    /// Credits charged per successful call
    pub credit_weight: u32,
    pub wire: WireShape,
}

static RED: EngineProfile = EngineProfile {
    engine: EngineId::Red,
    provider: "DeepSeek",
    key_env_vars: &["DEEPSEEK_API_KEY"],
    base_url: "https://api.deepseek.com",
    base_url_env: "DEEPSEEK_BASE_URL",
    default_model: "deepseek-chat",
    model_env: "DEEPSEEK_MODEL",
    default_temperature: 0.7,
    supports_vision: false,
    credit_weight: 1,
    wire: WireShape::OpenAiChat,
};

static BLUE: EngineProfile = EngineProfile {
    engine: EngineId::Blue,
    provider: "Kimi",
    key_env_vars: &["KIMI_API_KEY", "MOONSHOT_API_KEY"],
    base_url: "https://api.moonshot.ai/v1",
    base_url_env: "KIMI_BASE_URL",
    default_model: "moonshot-v1-32k",
    model_env: "KIMI_MODEL",
    default_temperature: 0.6,
    supports_vision: false,
    credit_weight: 1,
    wire: WireShape::OpenAiChat,
};

static GREEN: EngineProfile = EngineProfile {
    engine: EngineId::Green,
    provider: "Anthropic",
    key_env_vars: &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"],
    base_url: "https://api.anthropic.com",
    base_url_env: "ANTHROPIC_BASE_URL",
    default_model: "claude-sonnet-4-20250514",
    model_env: "ANTHROPIC_MODEL",
    default_temperature: 0.7,
    supports_vision: true,
    credit_weight: 3,
    wire: WireShape::AnthropicMessages,
};

static YELLOW: EngineProfile = EngineProfile {
    engine: EngineId::Yellow,
    provider: "Gemini",
    key_env_vars: &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
    base_url: "https://generativelanguage.googleapis.com",
    base_url_env: "GEMINI_BASE_URL",
    default_model: "gemini-2.0-flash",
    model_env: "GEMINI_MODEL",
    default_temperature: 0.7,
    supports_vision: true,
    credit_weight: 1,
    wire: WireShape::GeminiGenerate,
};

static ORANGE: EngineProfile = EngineProfile {
    engine: EngineId::Orange,
    provider: "OpenAI",
    key_env_vars: &["OPENAI_API_KEY"],
    base_url: "https://api.openai.com/v1",
    base_url_env: "OPENAI_BASE_URL",
    default_model: "gpt-4o-mini",
    model_env: "OPENAI_MODEL",
    default_temperature: 0.7,
    supports_vision: true,
    credit_weight: 1,
    wire: WireShape::OpenAiChat,
};

impl EngineProfile {
    pub fn of(engine: EngineId) -> &'static EngineProfile {
        match engine {
            EngineId::Red => &RED,
            EngineId::Blue => &BLUE,
            EngineId::Green => &GREEN,
            EngineId::Yellow => &YELLOW,
            EngineId::Orange => &ORANGE,
        }
    }

    /// Credits to report explicitly; only engines above the base weight do
    pub fn reported_credits(&self) -> Option<u32> {
        (self.credit_weight > 1).then_some(self.credit_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_match_their_engine() {
        for engine in EngineId::ALL {
            assert_eq!(engine.profile().engine, engine);
            assert!(!engine.profile().key_env_vars.is_empty());
        }
    }

    #[test]
    fn test_only_costliest_engine_reports_credits() {
        let reporting: Vec<_> = EngineId::ALL
            .iter()
            .filter(|e| e.profile().reported_credits().is_some())
            .collect();
        assert_eq!(reporting, vec![&EngineId::Green]);
    }

    #[test]
    fn test_three_engines_share_openai_shape() {
        let openai_shaped = EngineId::ALL
            .iter()
            .filter(|e| e.profile().wire == WireShape::OpenAiChat)
            .count();
        assert_eq!(openai_shaped, 3);
    }
}
