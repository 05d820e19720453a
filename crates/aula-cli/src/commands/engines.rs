//! Engine credential status

use aula_core::config::EnvSource;
use aula_core::engine::{CredentialResolver, CredentialStatus, EngineId, select_vision_engine};
use colored::*;

pub fn show_engines(env: &EnvSource) -> anyhow::Result<()> {
    let credentials = CredentialResolver::new(env.clone());

    println!();
    println!("{}", "Engines".bold().underline());
    println!("{}", "=".repeat(50).dimmed());

    for engine in EngineId::ALL {
        let profile = engine.profile();
        let status = match credentials.status(engine) {
            CredentialStatus::Env { var, masked } => format!("{} ({})", masked, var).green(),
            CredentialStatus::Override { masked } => format!("{} (override)", masked).green(),
            CredentialStatus::Invalid { reason } => reason.red(),
            CredentialStatus::Missing { vars } => format!("not set ({})", vars.join(" or ")).yellow(),
        };
        let vision = if profile.supports_vision { "vision" } else { "" };

        println!(
            "  {:<7} {:<10} {:<26} {:<6} {}",
            engine.label().cyan().bold(),
            profile.provider,
            profile.default_model.dimmed(),
            vision,
            status
        );
    }
    println!();
    Ok(())
}

pub fn show_vision(env: &EnvSource) -> anyhow::Result<()> {
    let credentials = CredentialResolver::new(env.clone());
    let selected = select_vision_engine(&credentials)?;
    println!(
        "{} {} ({})",
        "Vision engine:".bold(),
        selected.engine.label().green(),
        selected.engine.profile().provider
    );
    Ok(())
}
