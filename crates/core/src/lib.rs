pub mod agent_config;
pub mod client;
pub mod error;
pub mod types;

pub use agent_config::AgentConfig;
pub use client::{AgentApi, BlandClient, ClientSettings};
pub use error::ClientError;
pub use types::{AgentId, AgentRecord, ApiKey, ConversationRecord, SessionTokenResponse};
