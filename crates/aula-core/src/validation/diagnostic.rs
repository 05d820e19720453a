//! Rules for generated diagnostic questions
//!
//! Expected payload:
//!
//! ```json
//! {"questoes": [{
//!     "enunciado": "...",
//!     "gabarito": "A",
//!     "instrucao_aplicacao": "...",
//!     "contexto_visual": "...",
//!     "tempo_estimado_min": 3,
//!     "demanda_cognitiva": "baixa"
//! }]}
//! ```

use super::result::ValidationResult;
use crate::error::AulaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer keys an item may use; other letters are distractor positions
pub const PERMITTED_ANSWER_KEYS: [&str; 2] = ["A", "B"];

pub const MAX_STATEMENT_SENTENCES: usize = 3;

pub const MIN_INSTRUCTION_CHARS: usize = 20;

/// Estimated minutes above which working-memory-sensitive profiles warn
pub const TIME_WARNING_MINUTES: f64 = 5.0;

/// Learner profile targeted by a question set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Profile {
    /// Autism spectrum
    Tea,
    /// Attention deficit / hyperactivity
    Tdah,
    /// Intellectual disability
    Di,
    Dislexia,
    Discalculia,
    /// Visual impairment
    Dv,
    /// Hearing impairment
    Da,
    /// High abilities / giftedness
    Ah,
}

impl Profile {
    pub fn code(&self) -> &'static str {
        match self {
            Profile::Tea => "TEA",
            Profile::Tdah => "TDAH",
            Profile::Di => "DI",
            Profile::Dislexia => "DISLEXIA",
            Profile::Discalculia => "DISCALCULIA",
            Profile::Dv => "DV",
            Profile::Da => "DA",
            Profile::Ah => "AH",
        }
    }

    /// Every profile needs a visual-context aid except DV and AH
    pub fn requires_visual_context(&self) -> bool {
        !matches!(self, Profile::Dv | Profile::Ah)
    }

    /// Statement word ceiling for length-sensitive profiles
    pub fn word_ceiling(&self) -> Option<usize> {
        match self {
            Profile::Dislexia => Some(25),
            Profile::Di => Some(20),
            Profile::Tdah => Some(30),
            _ => None,
        }
    }

    pub fn is_working_memory_sensitive(&self) -> bool {
        matches!(self, Profile::Tdah | Profile::Di)
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Profile {
    type Err = AulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TEA" => Ok(Profile::Tea),
            "TDAH" => Ok(Profile::Tdah),
            "DI" => Ok(Profile::Di),
            "DISLEXIA" => Ok(Profile::Dislexia),
            "DISCALCULIA" => Ok(Profile::Discalculia),
            "DV" => Ok(Profile::Dv),
            "DA" => Ok(Profile::Da),
            "AH" => Ok(Profile::Ah),
            other => Err(AulaError::config(format!("Unknown learner profile: {}", other))),
        }
    }
}

/// Validator for one profile and ability tier (0 to 4)
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticValidator {
    profile: Profile,
    tier: u8,
}

impl DiagnosticValidator {
    pub fn new(profile: Profile, tier: u8) -> Self {
        Self { profile, tier }
    }

    pub fn validate(&self, payload: &Value) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let Some(items) = payload
            .get("questoes")
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
        else {
            return ValidationResult::invalid(vec![
                "Campo 'questoes' ausente ou vazio".to_string(),
            ]);
        };

        for (index, item) in items.iter().enumerate() {
            self.check_item(index + 1, item, &mut errors, &mut warnings);
        }

        ValidationResult::from_parts(errors, warnings)
    }

    fn check_item(
        &self,
        number: usize,
        item: &Value,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        let text = |field: &str| item.get(field).and_then(Value::as_str).map(str::trim);

        match text("gabarito") {
            Some(key) if PERMITTED_ANSWER_KEYS.contains(&key.to_uppercase().as_str()) => {}
            Some(key) => errors.push(format!(
                "Questão {}: gabarito '{}' inválido (permitidos: {})",
                number,
                key,
                PERMITTED_ANSWER_KEYS.join(", ")
            )),
            None => errors.push(format!("Questão {}: gabarito ausente", number)),
        }

        match text("enunciado").filter(|s| !s.is_empty()) {
            Some(statement) => {
                let sentences = count_sentences(statement);
                if sentences > MAX_STATEMENT_SENTENCES {
                    errors.push(format!(
                        "Questão {}: enunciado com {} frases (máximo {})",
                        number, sentences, MAX_STATEMENT_SENTENCES
                    ));
                }
                if let Some(ceiling) = self.profile.word_ceiling() {
                    let words = statement.split_whitespace().count();
                    if words > ceiling {
                        errors.push(format!(
                            "Questão {}: enunciado com {} palavras (máximo {} para {})",
                            number, words, ceiling, self.profile
                        ));
                    }
                }
            }
            None => errors.push(format!("Questão {}: enunciado ausente", number)),
        }

        let instruction_chars = text("instrucao_aplicacao").map_or(0, |s| s.chars().count());
        if instruction_chars < MIN_INSTRUCTION_CHARS {
            errors.push(format!(
                "Questão {}: instrucao_aplicacao muito curta ({} caracteres, mínimo {})",
                number, instruction_chars, MIN_INSTRUCTION_CHARS
            ));
        }

        if self.profile.requires_visual_context()
            && text("contexto_visual").is_none_or(str::is_empty)
        {
            errors.push(format!(
                "Questão {}: contexto_visual obrigatório para o perfil {}",
                number, self.profile
            ));
        }

        if self.profile.is_working_memory_sensitive() {
            if let Some(minutes) = item.get("tempo_estimado_min").and_then(Value::as_f64) {
                if minutes > TIME_WARNING_MINUTES {
                    warnings.push(format!(
                        "Questão {}: tempo estimado de {} min acima de {} min para {}",
                        number, minutes, TIME_WARNING_MINUTES, self.profile
                    ));
                }
            }
        }

        let high_demand = text("demanda_cognitiva").is_some_and(|d| d.eq_ignore_ascii_case("alta"));
        if self.tier <= 1 && high_demand {
            errors.push(format!(
                "Questão {}: demanda cognitiva alta incompatível com o nível {}",
                number, self.tier
            ));
        }
    }
}

/// Sentences end at `.`, `!` or `?` followed by whitespace or end of text
fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut pending = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let boundary = chars.peek().is_none_or(|next| next.is_whitespace());
            if boundary && pending {
                count += 1;
                pending = false;
            }
        } else if c.is_alphanumeric() {
            pending = true;
        }
    }

    count + usize::from(pending)
}
