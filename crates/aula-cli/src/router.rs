//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;
use aula_core::config::{EnvSource, PipelineConfig};

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let console = CliConsole::new(cli.verbose);

    match cli.command {
        Commands::Generate {
            prompt,
            system,
            engines,
            student,
            aux_names,
            model,
            temperature,
            max_tokens,
            workspace,
        } => {
            let config = load_config(&cli.config, &console)?;
            let args = commands::generate::GenerateArgs {
                prompt,
                system,
                engines,
                student,
                aux_names,
                model,
                temperature,
                max_tokens,
                workspace,
            };
            commands::generate::run(&console, config, args).await
        }
        Commands::Engines => commands::engines::show_engines(&EnvSource::Process),
        Commands::Vision => commands::engines::show_vision(&EnvSource::Process),
        Commands::Validate {
            file,
            profile,
            tier,
        } => commands::validate::validate_file(&console, &file, profile, tier),
        Commands::Metrics { file } => commands::validate::show_metrics(&file),
        Commands::Serve { addr } => {
            let config = load_config(&cli.config, &console)?;
            commands::serve::run(&console, config, &addr).await
        }
    }
}

fn load_config(
    path: &Option<std::path::PathBuf>,
    console: &CliConsole,
) -> anyhow::Result<PipelineConfig> {
    let config = PipelineConfig::load(path.as_deref(), &EnvSource::Process)?;
    console.info(&format!(
        "engines: {}, max retries: {}",
        config
            .engine_chain()
            .iter()
            .map(|e| e.label())
            .collect::<Vec<_>>()
            .join(" → "),
        config.max_retries
    ));
    Ok(config)
}
