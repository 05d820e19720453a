//! Vision-capable engine selection

use super::credential::CredentialResolver;
use super::id::EngineId;
use crate::error::{AulaError, AulaResult};
use tracing::debug;

/// Vision engines in preference order
pub const VISION_PRIORITY: [EngineId; 3] = [EngineId::Yellow, EngineId::Orange, EngineId::Green];

/// Engine chosen for an image task, with its resolved key
#[derive(Clone, PartialEq, Eq)]
pub struct VisionEngine {
    pub engine: EngineId,
    pub key: String,
}

impl std::fmt::Debug for VisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionEngine")
            .field("engine", &self.engine)
            .field("key", &super::credential::mask_api_key(&self.key))
            .finish()
    }
}

/// First engine in [`VISION_PRIORITY`] with a present, shape-valid key
pub fn select_vision_engine(credentials: &CredentialResolver) -> AulaResult<VisionEngine> {
    for engine in VISION_PRIORITY {
        match credentials.resolve(engine, None) {
            Ok(key) => {
                debug!(engine = %engine, "selected vision engine");
                return Ok(VisionEngine { engine, key });
            }
            Err(e) => debug!(engine = %engine, reason = %e, "vision engine not usable"),
        }
    }

    let vars = VISION_PRIORITY
        .iter()
        .map(|engine| engine.profile().key_env_vars.join(" or "))
        .collect::<Vec<_>>()
        .join(", ");
    Err(AulaError::config(format!(
        "No vision-capable engine is configured. Set one of: {}",
        vars
    )))
}
