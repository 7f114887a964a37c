//! Agent Configuration Payload
//!
//! The body sent to Bland when a web agent is created. Its fields belong to
//! Bland's API contract, so the payload is kept as an opaque JSON object and
//! forwarded verbatim.

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::path::Path;

use crate::error::ClientError;

/// Read-only agent-creation payload, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AgentConfig(Map<String, Value>);

impl AgentConfig {
    /// Wraps an already-built JSON value. Only objects are accepted.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Loads the payload from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let to_err = |reason: String| ClientError::AgentConfig {
            path: path.to_path_buf(),
            reason,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| to_err(e.to_string()))?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| to_err(e.to_string()))?;
        Self::from_value(value).ok_or_else(|| to_err("expected a JSON object".to_string()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        let mut map = Map::new();
        map.insert(
            "prompt".to_string(),
            json!("You are a friendly voice assistant. Keep answers short and conversational."),
        );
        map.insert("voice".to_string(), json!("maya"));
        map.insert("language".to_string(), json!("ENG"));
        map.insert(
            "first_sentence".to_string(),
            json!("Hi there! How can I help you today?"),
        );
        map.insert("max_duration".to_string(), json!(15));
        Self(map)
    }
}
