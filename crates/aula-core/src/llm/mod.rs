//! LLM message and request parameter types

pub mod messages;
pub mod options;

pub use messages::{LlmMessage, MessageRole};
pub use options::GenerationOptions;
