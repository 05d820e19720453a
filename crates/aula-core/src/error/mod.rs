//! Error types for the Aula generation pipeline
//!
//! Every fallible pipeline operation returns [`AulaResult`]. The variants map
//! onto the failure taxonomy the orchestrator reasons about:
//! - `Config`: missing or malformed credential, raised before any network call
//! - `Provider`: non-2xx response or unreadable payload from an engine
//! - `UnsupportedEngine`: unknown engine identifier
//! - `ValidationExhausted`: generated content still rejected after all retries
//! - `NoCandidateAvailable`: a fallback list that never produced an attempt
//!
//! Rate limiting and anonymization never produce errors.

mod classify;
mod constructors;
mod conversions;
mod types;

pub use types::{AulaError, AulaResult};
