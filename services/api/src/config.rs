use bland_core::{
    AgentId, ApiKey, ClientSettings,
    client::{DEFAULT_API_URL, DEFAULT_WEB_URL},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub api_key: ApiKey,
    pub default_agent_id: Option<AgentId>,
    pub api_url: String,
    pub web_url: String,
    pub request_timeout: Duration,
    pub agent_config_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let api_key = std::env::var("BLAND_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(ApiKey::new)
            .ok_or_else(|| ConfigError::MissingVar("BLAND_API_KEY".to_string()))?;

        let default_agent_id = match std::env::var("BLAND_AGENT_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(AgentId::parse(&raw).map_err(|e| {
                ConfigError::InvalidValue("BLAND_AGENT_ID".to_string(), e.to_string())
            })?),
            _ => None,
        };

        let api_url =
            std::env::var("BLAND_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let web_url =
            std::env::var("BLAND_WEB_URL").unwrap_or_else(|_| DEFAULT_WEB_URL.to_string());

        let timeout_str = std::env::var("BLAND_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string());
        let request_timeout = match timeout_str.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(ConfigError::InvalidValue(
                    "BLAND_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", timeout_str),
                ));
            }
        };

        let agent_config_path = std::env::var("AGENT_CONFIG_PATH").ok().map(PathBuf::from);

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            api_key,
            default_agent_id,
            api_url,
            web_url,
            request_timeout,
            agent_config_path,
            log_level,
        })
    }

    /// The subset of configuration the Bland client needs.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_url: self.api_url.clone(),
            web_url: self.web_url.clone(),
            api_key: self.api_key.clone(),
            default_agent_id: self.default_agent_id.clone(),
            timeout: self.request_timeout,
        }
    }
}
