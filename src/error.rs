//! Top-level error type for host startup
//!
//! Step-level problems never surface here; they are reported as per-run
//! diagnostics by the interpreter. This type covers the fatal cases that
//! abort before any step executes.

use crate::config::ConfigError;
use crate::llm::LlmError;
use thiserror::Error;

/// Fatal errors raised while setting up a run.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM client error: {0}")]
    Llm(#[from] LlmError),
}

/// Result type for host-level operations
pub type FlowResult<T> = Result<T, FlowError>;
