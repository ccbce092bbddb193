//! Inferflow - declarative prompt pipelines
//!
//! A runner for JSON pipeline configurations that chain constants, file
//! reads, Gemini completions, and nested sub-pipelines through a shared
//! per-invocation workspace.
//!
//! # Overview
//!
//! This crate provides:
//! - A closed action-record type for the configuration format
//! - A sequential, recursive pipeline interpreter with per-step
//!   diagnostics and best-effort workspace snapshots
//! - A Gemini HTTP client behind a mockable trait seam
//! - File-source and debug-sink collaborator traits
//!
//! # Quick Start
//!
//! ```rust
//! use inferflow::config::PipelineConfig;
//!
//! let config = PipelineConfig::from_json(r#"[
//!     {"action_type": "define_constant", "output_path": "x", "value": "hi"},
//!     {"action_type": "output", "input_path": "x"}
//! ]"#).unwrap();
//!
//! assert_eq!(config.steps.len(), 2);
//! assert_eq!(config.steps[0].kind(), "define_constant");
//! ```

pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod testing;

pub use config::{ConfigError, PipelineConfig};
pub use error::{FlowError, FlowResult};
pub use llm::{CompletionRequest, GenerationConfig, LlmClient, LlmError, ModelConfig};
pub use pipeline::{ActionRecord, Interpreter, RunOutcome, Workspace};
