//! Aula CLI application
//!
//! Command-line and HTTP front end for the Aula generation pipeline.
//!
//! # Commands
//!
//! - `aula generate "<prompt>"`: one generation through the orchestrator
//! - `aula engines`: credential status per engine (keys masked)
//! - `aula vision`: which vision-capable engine would be used
//! - `aula validate <file> --profile TEA --tier 2`: check a generated question set
//! - `aula metrics <file>`: aggregate reviewer outcomes
//! - `aula serve`: expose `POST /v1/generate` behind the rate limiter
//!
//! Set `RUST_LOG=debug` for per-attempt logging. A `.env` file in the working
//! directory is loaded before anything else.

#![allow(clippy::redundant_closure)]

mod args;
mod commands;
mod console;
mod router;
mod server;

use args::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    router::route(cli).await
}
