//! Errors produced by the Bland client.

use std::path::PathBuf;

/// Every way a call to the Bland API can fail.
///
/// The three upstream variants carry the HTTP status and the raw response body
/// so the message shown to a caller contains both.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to create agent: {status} - {body}")]
    AgentCreation { status: u16, body: String },

    #[error("API responded with status: {status} - {body}")]
    SessionToken { status: u16, body: String },

    #[error("Failed to start conversation: {status} - {body}")]
    ConversationStart { status: u16, body: String },

    #[error("Agent ID is required")]
    InvalidAgentId,

    #[error("No default agent ID is configured")]
    AgentIdentifierMissing,

    #[error("Malformed response from Bland AI: {0}")]
    MalformedResponse(String),

    #[error("Request to Bland AI timed out during {operation}")]
    Timeout { operation: &'static str },

    #[error("Request to Bland AI failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode Bland AI response during {operation}: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid Bland base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to load agent config from {path}: {reason}")]
    AgentConfig { path: PathBuf, reason: String },
}

impl ClientError {
    /// Upstream status code, if the error came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AgentCreation { status, .. }
            | Self::SessionToken { status, .. }
            | Self::ConversationStart { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Classifies a transport-level reqwest failure for the given operation.
    pub(crate) fn from_send(operation: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { operation }
        } else {
            Self::Transport(err)
        }
    }

    pub(crate) fn from_decode(operation: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { operation }
        } else {
            Self::Decode {
                operation,
                source: err,
            }
        }
    }
}
