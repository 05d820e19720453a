//! Reversible name anonymization for outbound prompts
//!
//! Personal names are replaced by bracketed tokens before messages leave the
//! process and put back into the engine's answer afterwards. A request with no
//! identifiable subject borrows its messages untouched and restores with the
//! identity.

mod context;
mod matcher;

pub use context::{AUX_NAME_MIN_CHARS, AnonymizationContext, FIRST_NAME_MIN_CHARS, STUDENT_TOKEN};

use crate::llm::LlmMessage;
use std::borrow::Cow;

/// Anonymized messages plus the inverse mapping
#[derive(Debug, Clone)]
pub struct Anonymized<'a> {
    /// Substituted messages; borrowed when nothing needed replacing
    pub messages: Cow<'a, [LlmMessage]>,
    /// Inverse substitution for the engine's answer
    pub restorer: Restorer,
}

/// Inverse of one anonymization pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Restorer {
    /// No mapping was applied
    #[default]
    Identity,
    /// `(token, name)` pairs, token including brackets
    Mapping(Vec<(String, String)>),
}

impl Restorer {
    /// Replace every emitted token with its original name
    pub fn restore(&self, text: &str) -> String {
        match self {
            Restorer::Identity => text.to_string(),
            Restorer::Mapping(pairs) => pairs
                .iter()
                .fold(text.to_string(), |acc, (token, name)| acc.replace(token, name)),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Restorer::Identity)
    }
}

/// Anonymize every message (all roles) under an optional context
pub fn anonymize<'a>(
    messages: &'a [LlmMessage],
    context: Option<&AnonymizationContext>,
) -> Anonymized<'a> {
    let Some(context) = context.filter(|c| !c.is_empty()) else {
        return Anonymized {
            messages: Cow::Borrowed(messages),
            restorer: Restorer::Identity,
        };
    };

    let anonymized = messages
        .iter()
        .map(|message| message.with_content(context.anonymize_text(&message.content)))
        .collect::<Vec<_>>();

    tracing::debug!(
        messages = anonymized.len(),
        tokens = context.token_count(),
        "anonymized outbound messages"
    );

    Anonymized {
        messages: Cow::Owned(anonymized),
        restorer: context.restorer(),
    }
}
