//! LLM client abstraction and request/response types
//!
//! Defines the trait the interpreter calls for `llm_prompt` steps,
//! keeping the HTTP backend swappable and mockable in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single turn in a conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Conversation roles recognized by the Gemini API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

/// A single-turn completion request.
///
/// Pipeline steps are stateless, so `history` is always empty when the
/// interpreter is the caller; it stays in the contract because the API
/// surface is a chat endpoint.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub history: Vec<Message>,
    pub prompt: String,
    pub generation_config: Option<GenerationConfig>,
}

impl CompletionRequest {
    /// Stateless single-turn request, the interpreter's only shape.
    pub fn single_turn(prompt: impl Into<String>, generation_config: Option<GenerationConfig>) -> Self {
        Self {
            history: Vec::new(),
            prompt: prompt.into(),
            generation_config,
        }
    }
}

/// Sampling options passed through opaquely from the pipeline config.
///
/// Deserialization accepts both the snake_case spelling used in pipeline
/// configs and the camelCase spelling of the wire format; serialization
/// always emits camelCase for the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(rename = "topP", alias = "top_p", skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(rename = "topK", alias = "top_k", skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(
        rename = "maxOutputTokens",
        alias = "max_output_tokens",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_output_tokens: Option<u32>,
    #[serde(
        rename = "responseMimeType",
        alias = "response_mime_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub response_mime_type: Option<String>,
}

impl Default for GenerationConfig {
    /// Defaults applied when a step carries no `generation_config`.
    fn default() -> Self {
        Self {
            temperature: Some(1.0),
            top_p: Some(0.95),
            top_k: Some(64),
            max_output_tokens: Some(8192),
            response_mime_type: Some("text/plain".to_string()),
        }
    }
}

/// Model selection and system instruction, fixed per client instance.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: String,
    pub system_instruction: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro-preview-03-25".to_string(),
            system_instruction: String::new(),
        }
    }
}

/// LLM client trait for dependency injection and testing.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Backend name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Run one completion and return the response text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

/// LLM client errors.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("Client not configured: {0}")]
    NotConfigured(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("API error: {0}")]
    ApiError(String),
}
