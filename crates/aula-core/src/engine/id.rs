//! Engine identifiers

use super::profile::EngineProfile;
use crate::error::AulaError;
use serde::{Deserialize, Serialize};

/// The five interchangeable engines, labelled by color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineId {
    /// DeepSeek, OpenAI-compatible
    Red,
    /// Moonshot Kimi, OpenAI-compatible
    Blue,
    /// Anthropic Claude, native messages API
    Green,
    /// Google Gemini, flattened prompt
    Yellow,
    /// OpenAI
    Orange,
}

impl EngineId {
    pub const ALL: [EngineId; 5] = [
        EngineId::Red,
        EngineId::Blue,
        EngineId::Green,
        EngineId::Yellow,
        EngineId::Orange,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EngineId::Red => "red",
            EngineId::Blue => "blue",
            EngineId::Green => "green",
            EngineId::Yellow => "yellow",
            EngineId::Orange => "orange",
        }
    }

    /// Static provider profile for this engine
    pub fn profile(&self) -> &'static EngineProfile {
        EngineProfile::of(*self)
    }
}

impl std::fmt::Display for EngineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for EngineId {
    type Err = AulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(EngineId::Red),
            "blue" => Ok(EngineId::Blue),
            "green" => Ok(EngineId::Green),
            "yellow" => Ok(EngineId::Yellow),
            "orange" => Ok(EngineId::Orange),
            other => Err(AulaError::unsupported_engine(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("Orange".parse::<EngineId>().unwrap(), EngineId::Orange);
        assert_eq!(" yellow ".parse::<EngineId>().unwrap(), EngineId::Yellow);
        for engine in EngineId::ALL {
            assert_eq!(engine.label().parse::<EngineId>().unwrap(), engine);
        }
    }

    #[test]
    fn test_unknown_label_is_unsupported() {
        let err = "violet".parse::<EngineId>().unwrap_err();
        assert!(matches!(err, AulaError::UnsupportedEngine { ref engine } if engine == "violet"));
    }
}
