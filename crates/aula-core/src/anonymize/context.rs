//! Names to hide for one request

use super::Restorer;
use super::matcher::replace_ignore_case;

/// Token standing in for the primary subject
pub const STUDENT_TOKEN: &str = "[ESTUDANTE]";

/// A first name is replaced on its own only when longer than this
pub const FIRST_NAME_MIN_CHARS: usize = 3;

/// Auxiliary names shorter than this are ignored
pub const AUX_NAME_MIN_CHARS: usize = 2;

/// Primary subject plus auxiliary `token -> name` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymizationContext {
    primary_name: Option<String>,
    aux_names: Vec<(String, String)>,
}

impl AnonymizationContext {
    /// Context for a primary subject
    pub fn new(primary_name: impl Into<String>) -> Self {
        let name = primary_name.into();
        let trimmed = name.trim();
        Self {
            primary_name: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            aux_names: Vec::new(),
        }
    }

    /// Add an auxiliary name hidden behind `[token]`
    pub fn with_aux(mut self, token: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.chars().filter(|c| !c.is_whitespace()).count() >= AUX_NAME_MIN_CHARS {
            self.aux_names.push((token.into(), trimmed.to_string()));
        }
        self
    }

    pub fn primary_name(&self) -> Option<&str> {
        self.primary_name.as_deref()
    }

    /// True when applying this context would change nothing
    pub fn is_empty(&self) -> bool {
        self.primary_name.is_none() && self.aux_names.is_empty()
    }

    pub(super) fn token_count(&self) -> usize {
        self.aux_names.len() + usize::from(self.primary_name.is_some())
    }

    /// Replace every known name in `text` with its token
    pub fn anonymize_text(&self, text: &str) -> String {
        let mut output = text.to_string();

        if let Some(primary) = &self.primary_name {
            output = replace_ignore_case(&output, primary, STUDENT_TOKEN);

            if let Some(first) = primary.split_whitespace().next() {
                if first.chars().count() > FIRST_NAME_MIN_CHARS && first != primary {
                    output = replace_ignore_case(&output, first, STUDENT_TOKEN);
                }
            }
        }

        for (token, name) in &self.aux_names {
            output = replace_ignore_case(&output, name, &bracketed(token));
        }

        output
    }

    /// Inverse mapping for this context
    pub fn restorer(&self) -> Restorer {
        if self.is_empty() {
            return Restorer::Identity;
        }

        let mut pairs = Vec::with_capacity(self.token_count());
        if let Some(primary) = &self.primary_name {
            pairs.push((STUDENT_TOKEN.to_string(), primary.clone()));
        }
        for (token, name) in &self.aux_names {
            pairs.push((bracketed(token), name.clone()));
        }
        Restorer::Mapping(pairs)
    }
}

fn bracketed(token: &str) -> String {
    format!("[{}]", token)
}
