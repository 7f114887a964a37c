//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the Bland client
//! shared by every request, and the startup helper that builds the client from
//! the loaded configuration.

use crate::config::Config;
use bland_core::{AgentApi, AgentConfig, BlandClient, ClientError};
use std::sync::Arc;
use tracing::info;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub agent_api: Arc<dyn AgentApi>,
}

impl AppState {
    pub fn new(agent_api: Arc<dyn AgentApi>) -> Self {
        Self { agent_api }
    }
}

/// Loads the agent payload and constructs a `BlandClient` from `config`.
pub fn build_client(config: &Config) -> Result<BlandClient, ClientError> {
    let agent_config = match &config.agent_config_path {
        Some(path) => {
            info!(path = %path.display(), "Loading agent config from file");
            AgentConfig::from_path(path)?
        }
        None => {
            info!("AGENT_CONFIG_PATH not set, using built-in agent config");
            AgentConfig::default()
        }
    };
    BlandClient::new(config.client_settings(), Arc::new(agent_config))
}
