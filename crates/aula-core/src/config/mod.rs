//! Configuration for the generation pipeline
//!
//! Settings layer as defaults → optional file → `AULA_*` environment
//! variables. Engine credentials, base URLs and model names are read
//! separately through [`EnvSource`] at call time.

mod env;
mod pipeline;
mod timeouts;

pub use env::EnvSource;
pub use pipeline::{CONFIG_PATH_ENV, ENV_PREFIX, PipelineConfig};
pub use timeouts::TimeoutConfig;
