//! One-shot generation

use crate::console::CliConsole;
use aula_core::anonymize::AnonymizationContext;
use aula_core::config::PipelineConfig;
use aula_core::engine::{EngineId, EngineRouter};
use aula_core::llm::{GenerationOptions, LlmMessage};
use aula_core::orchestrator::{GenerationRequest, Orchestrator};

pub struct GenerateArgs {
    pub prompt: String,
    pub system: Option<String>,
    pub engines: Vec<EngineId>,
    pub student: Option<String>,
    pub aux_names: Vec<(String, String)>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub workspace: Option<String>,
}

impl GenerateArgs {
    pub fn into_request(self) -> GenerationRequest {
        let mut messages = Vec::new();
        if let Some(system) = self.system {
            messages.push(LlmMessage::system(system));
        }
        messages.push(LlmMessage::user(self.prompt));

        let mut options = GenerationOptions::new().with_source("cli");
        options.model = self.model;
        options.temperature = self.temperature;
        options.max_tokens = self.max_tokens;
        options.workspace_id = self.workspace;

        let mut request = GenerationRequest::new(messages).with_options(options);
        if !self.engines.is_empty() {
            request = request.with_engines(self.engines);
        }

        if self.student.is_some() || !self.aux_names.is_empty() {
            let context = self.aux_names.into_iter().fold(
                AnonymizationContext::new(self.student.unwrap_or_default()),
                |context, (token, name)| context.with_aux(token, name),
            );
            request = request.with_anonymization(context);
        }
        request
    }
}

pub async fn run(console: &CliConsole, config: PipelineConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let router = EngineRouter::from_env(config.timeouts())?;
    let orchestrator = Orchestrator::new(router, config);
    let request = args.into_request();

    console.info(&format!("sending {} message(s)", request.messages.len()));
    match orchestrator.generate(&request).await {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            console.error(&e.to_string());
            Err(e.into())
        }
    }
}
