//! Mock collaborator implementations for testing
//!
//! Scripted, recording stand-ins for the interpreter's trait seams so
//! pipeline behavior can be tested without network or disk.

use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::pipeline::collaborators::{DebugSink, FileSource};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

/// Scripted LLM client: returns queued responses in order and records
/// every request it receives.
#[derive(Default)]
pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmClient {
    pub fn with_responses(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Arc::default(),
        }
    }

    /// Handle to the recorded requests, usable after the client has been
    /// moved into an interpreter.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        self.requests.clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::ApiError("no scripted response left".to_string())))
    }
}

/// In-memory file source keyed by path.
#[derive(Default)]
pub struct MockFileSource {
    files: HashMap<String, String>,
}

impl MockFileSource {
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl FileSource for MockFileSource {
    async fn read(&self, path: &str) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no file: {path}")))
    }
}

/// Debug sink that keeps every snapshot in memory, in order.
#[derive(Default)]
pub struct RecordingSink {
    pub snapshots: Mutex<Vec<Value>>,
}

#[async_trait]
impl DebugSink for RecordingSink {
    async fn record(&self, snapshot: &Value) -> io::Result<()> {
        self.snapshots.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

/// Debug sink that always fails, for best-effort semantics tests.
pub struct FailingSink;

#[async_trait]
impl DebugSink for FailingSink {
    async fn record(&self, _snapshot: &Value) -> io::Result<()> {
        Err(io::Error::other("sink unavailable"))
    }
}
