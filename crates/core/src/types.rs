use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::ClientError;

/// Identifier of an agent hosted by Bland.
///
/// Always non-empty and trimmed; the only way to build one is [`AgentId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidAgentId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The Bland API key.
///
/// Wrapped in a [`SecretString`] so it never shows up in `Debug` output. Use
/// [`ApiKey::redacted`] when the key has to be referenced in logs.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// A log-safe hint: the last four characters, or nothing for short keys.
    pub fn redacted(&self) -> String {
        let key = self.0.expose_secret();
        let chars: Vec<char> = key.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.redacted())
    }
}

/// Response of the session-token authorization call.
///
/// Only `token` is interpreted; every other field is kept as returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTokenResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionTokenResponse {
    /// The token, if Bland returned a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// An agent record as returned by `POST /v1/agents`, unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentRecord(pub Map<String, Value>);

impl AgentRecord {
    /// Looks for the new agent's id at the top level or under `agent`.
    pub fn agent_id(&self) -> Option<&str> {
        self.0
            .get("agent_id")
            .or_else(|| self.0.get("agent").and_then(|a| a.get("agent_id")))
            .and_then(Value::as_str)
    }
}

/// A conversation record as returned by `POST /v1/conversations`, unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationRecord(pub Map<String, Value>);
