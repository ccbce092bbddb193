//! Pipeline workspace (symbol table)
//!
//! One workspace instance exists per pipeline invocation. Nested `process`
//! steps get a fresh workspace; the only value that crosses the nesting
//! boundary is the nested pipeline's return value.

use serde_json::Value;
use std::collections::HashMap;

/// Mutable key-to-value mapping scoped to one pipeline invocation.
///
/// Values are arbitrary JSON: raw text, structures parsed from LLM
/// responses, or nested pipeline outputs. Later writes overwrite earlier
/// ones; there is no deletion.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    entries: HashMap<String, Value>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, overwriting unconditionally.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a reference element: a string naming an existing key yields
    /// the stored value rendered as text, anything else is taken literally.
    pub fn resolve(&self, element: &str) -> String {
        match self.entries.get(element) {
            Some(value) => value_to_text(value),
            None => element.to_string(),
        }
    }

    /// Serializable view of the full workspace, for the debug sink.
    pub fn snapshot(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

/// Render a stored value as prompt/output text. Strings are used as-is
/// (no surrounding quotes); structured values serialize to compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
