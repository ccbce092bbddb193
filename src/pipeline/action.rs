//! Action record types for pipeline configurations
//!
//! A pipeline configuration is a JSON array of action records, each tagged
//! by `action_type`. The enum is closed over the recognized kinds plus a
//! catch-all variant so unrecognized tags deserialize (and later no-op)
//! instead of failing the whole configuration.

use crate::llm::GenerationConfig;
use serde::Deserialize;
use serde_json::Value;

/// One declarative pipeline step.
///
/// Required fields are modeled as `Option` on purpose: a record missing a
/// required field must parse, then be reported and skipped at dispatch
/// time, leaving the rest of the pipeline runnable.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum ActionRecord {
    /// Store a verbatim value in the workspace.
    DefineConstant {
        output_path: Option<String>,
        #[serde(default)]
        value: Value,
    },
    /// Read a file and store its text content.
    FileInput {
        file_path: Option<String>,
        output_path: Option<String>,
    },
    /// Assemble a prompt, call the LLM, store the (JSON-parsed when
    /// possible) response.
    LlmPrompt {
        input_path: Option<String>,
        input_array: Option<Vec<String>>,
        generation_config: Option<GenerationConfig>,
        output_path: Option<String>,
    },
    /// Run a nested pipeline against a fresh workspace and store its
    /// return value.
    Process {
        process_steps: Option<Vec<ActionRecord>>,
        output_path: Option<String>,
    },
    /// Assemble the pipeline's return string and end the invocation.
    Output {
        input_path: Option<String>,
        output_array: Option<Vec<String>>,
    },
    /// Any unrecognized `action_type`; executed as a silent no-op.
    #[serde(other)]
    Unknown,
}

impl ActionRecord {
    /// Tag name used in logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ActionRecord::DefineConstant { .. } => "define_constant",
            ActionRecord::FileInput { .. } => "file_input",
            ActionRecord::LlmPrompt { .. } => "llm_prompt",
            ActionRecord::Process { .. } => "process",
            ActionRecord::Output { .. } => "output",
            ActionRecord::Unknown => "unknown",
        }
    }
}
