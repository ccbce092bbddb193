//! Inferflow - Main Entry Point
//!
//! Loads a JSON pipeline configuration, wires the collaborators, runs the
//! top-level pipeline invocation, and prints its returned string.

use clap::Parser;
use inferflow::config::{self, PipelineConfig};
use inferflow::error::FlowResult;
use inferflow::llm::{GeminiClient, GeminiConfig, ModelConfig};
use inferflow::logging::init_default_logging;
use inferflow::pipeline::{Interpreter, JsonFileSink, LocalFileSource, Workspace};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info};

/// Run a declarative Gemini prompt pipeline
#[derive(Parser)]
#[command(name = "inferflow")]
#[command(about = "Run a declarative Gemini prompt pipeline")]
#[command(version)]
struct Cli {
    /// Pipeline configuration file (JSON array of action records)
    config: PathBuf,

    /// Model identifier
    #[arg(long, default_value = "gemini-2.5-pro-preview-03-25")]
    model: String,

    /// System instruction sent with every prompt
    #[arg(long, default_value = "")]
    system_instruction: String,

    /// Environment variable holding the Gemini API key
    #[arg(long, default_value = "GEMINI_API_KEY")]
    api_key_env: String,

    /// Path the per-step workspace snapshot is written to
    #[arg(long, default_value = "inference_space.json")]
    snapshot: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    let config = match PipelineConfig::load_from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load pipeline configuration: {}", e);
            process::exit(1);
        }
    };

    let interpreter = match build_interpreter(&cli) {
        Ok(interpreter) => interpreter,
        Err(e) => {
            error!("Failed to set up pipeline run: {}", e);
            process::exit(1);
        }
    };

    let mut workspace = Workspace::new();
    let outcome = interpreter.run(&config.steps, &mut workspace).await;

    info!(
        executed = outcome.steps.len(),
        skipped = outcome.skipped_count(),
        "pipeline run complete"
    );

    if let Some(output) = outcome.output {
        println!("{output}");
    }
}

/// Wire the collaborators: local files, Gemini client, JSON snapshot sink.
fn build_interpreter(cli: &Cli) -> FlowResult<Interpreter> {
    let api_key = config::env_var_required(&cli.api_key_env)?;

    let gemini = GeminiClient::new(GeminiConfig {
        api_key,
        model: ModelConfig {
            model: cli.model.clone(),
            system_instruction: cli.system_instruction.clone(),
        },
        ..Default::default()
    })?;

    Ok(Interpreter::new(
        Arc::new(LocalFileSource),
        Arc::new(gemini),
        Arc::new(JsonFileSink::new(&cli.snapshot)),
    ))
}
