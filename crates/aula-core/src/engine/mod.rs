//! Engine routing
//!
//! Resolves a logical engine to a concrete provider (credential, base URL,
//! model), validates the credential shape, performs the call and normalizes
//! the provider's response to plain text. No retries happen here.

mod credential;
pub(crate) mod generator;
mod id;
mod profile;
pub mod providers;
mod router;
mod vision;

pub use credential::{CredentialResolver, CredentialStatus, mask_api_key, validate_key_shape};
pub use generator::TextGenerator;
pub use id::EngineId;
pub use profile::{EngineProfile, WireShape};
pub use router::{EngineEndpoint, EngineRouter};
pub use vision::{VISION_PRIORITY, VisionEngine, select_vision_engine};
