//! Pipeline configuration loading
//!
//! A pipeline configuration is a single JSON file containing an array of
//! action records. Loading failures are fatal for the whole run; no step
//! executes on a configuration error.

use crate::pipeline::ActionRecord;
use std::path::Path;
use thiserror::Error;

/// A loaded pipeline: the top-level ordered step sequence.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub steps: Vec<ActionRecord>,
}

impl PipelineConfig {
    /// Load and parse a pipeline configuration from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a pipeline configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let steps = serde_json::from_str(content)?;
        Ok(Self { steps })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// Resolve a required environment variable (e.g., the API key variable).
pub fn env_var_required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::EnvVarNotFound(name.to_string()))
}
