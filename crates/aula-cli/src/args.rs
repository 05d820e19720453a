//! CLI argument definitions using clap

use aula_core::engine::EngineId;
use aula_core::validation::Profile;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aula")]
#[command(about = "Aula - rate-limited, anonymizing LLM generation pipeline")]
#[command(version)]
pub struct Cli {
    /// Pipeline config file (TOML, YAML or JSON)
    #[arg(long, global = true, env = "AULA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate text through the orchestrator
    Generate {
        /// User prompt
        prompt: String,

        /// System instructions
        #[arg(long, short)]
        system: Option<String>,

        /// Engine to use; repeat for an ordered fallback chain
        #[arg(long = "engine", short, value_parser = parse_engine)]
        engines: Vec<EngineId>,

        /// Student name to anonymize before sending
        #[arg(long)]
        student: Option<String>,

        /// Extra names to anonymize, as TOKEN=Name
        #[arg(long = "aux", value_parser = parse_aux)]
        aux_names: Vec<(String, String)>,

        /// Force a model instead of the engine default or configured fallbacks
        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        temperature: Option<f32>,

        #[arg(long)]
        max_tokens: Option<u32>,

        /// Workspace billed for the call
        #[arg(long)]
        workspace: Option<String>,
    },

    /// Show credential status for every engine
    Engines,

    /// Show which vision-capable engine would be selected
    Vision,

    /// Validate a generated diagnostic question set (JSON file)
    Validate {
        file: PathBuf,

        /// Learner profile (TEA, TDAH, DI, DISLEXIA, DISCALCULIA, DV, DA, AH)
        #[arg(long, value_parser = parse_profile)]
        profile: Profile,

        /// Ability tier, 0 to 4
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=4))]
        tier: u8,
    },

    /// Aggregate reviewer outcomes from a JSON array of records
    Metrics { file: PathBuf },

    /// Serve the generation endpoint over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

fn parse_engine(raw: &str) -> Result<EngineId, String> {
    raw.parse().map_err(|e: aula_core::AulaError| e.to_string())
}

fn parse_profile(raw: &str) -> Result<Profile, String> {
    raw.parse().map_err(|e: aula_core::AulaError| e.to_string())
}

fn parse_aux(raw: &str) -> Result<(String, String), String> {
    let (token, name) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TOKEN=Name, got '{}'", raw))?;
    let token = token.trim().trim_start_matches('[').trim_end_matches(']');
    if token.is_empty() || name.trim().is_empty() {
        return Err(format!("expected TOKEN=Name, got '{}'", raw));
    }
    Ok((token.to_uppercase(), name.trim().to_string()))
}
