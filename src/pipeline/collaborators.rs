//! File-source and debug-sink collaborator traits
//!
//! Narrow seams around the interpreter's two non-LLM side effects, kept
//! as traits for dependency injection and testing.

use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::path::PathBuf;

/// Supplies raw file contents for `file_input` steps.
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn read(&self, path: &str) -> io::Result<String>;
}

/// Reads files from the local filesystem.
pub struct LocalFileSource;

#[async_trait]
impl FileSource for LocalFileSource {
    async fn read(&self, path: &str) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// Receives a snapshot of the full workspace after every step.
///
/// Best-effort: the interpreter logs sink failures and keeps going.
#[async_trait]
pub trait DebugSink: Send + Sync {
    async fn record(&self, snapshot: &Value) -> io::Result<()>;
}

/// Persists each snapshot to a fixed local path, overwriting the
/// previous one, so the latest pipeline state survives for post-mortem
/// inspection.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DebugSink for JsonFileSink {
    async fn record(&self, snapshot: &Value) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let body = serde_json::to_string_pretty(snapshot).map_err(io::Error::other)?;
        tokio::fs::write(&self.path, body).await
    }
}

/// Discards snapshots; useful when no debug output is wanted.
pub struct NullSink;

#[async_trait]
impl DebugSink for NullSink {
    async fn record(&self, _snapshot: &Value) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_local_file_source_reads_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "file body").unwrap();

        let source = LocalFileSource;
        let content = source.read(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(content, "file body");
    }

    #[tokio::test]
    async fn test_local_file_source_missing_file_is_an_error() {
        let source = LocalFileSource;
        let result = source.read("/definitely/not/here.txt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_json_file_sink_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let sink = JsonFileSink::new(&path);

        sink.record(&json!({"step": 1})).await.unwrap();
        sink.record(&json!({"step": 2})).await.unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, json!({"step": 2}));
    }

    #[tokio::test]
    async fn test_json_file_sink_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let sink = JsonFileSink::new(&path);

        sink.record(&json!({})).await.unwrap();
        assert!(path.exists());
    }
}
