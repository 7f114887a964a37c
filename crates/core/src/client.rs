//! Bland API Client
//!
//! This module defines the `AgentApi` contract used by the web service and the
//! CLI, along with `BlandClient`, its implementation over `reqwest`. Every
//! operation is a single pass-through to Bland: no retries, no caching, and the
//! first failure is final.

use async_trait::async_trait;
use reqwest::{
    Response, Url,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info, instrument};

use crate::{
    agent_config::AgentConfig,
    error::ClientError,
    types::{AgentId, AgentRecord, ApiKey, ConversationRecord, SessionTokenResponse},
};

pub const DEFAULT_API_URL: &str = "https://api.bland.ai";
pub const DEFAULT_WEB_URL: &str = "https://web.bland.ai";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The operations this service performs against Bland.
///
/// Kept as a trait so handlers can be exercised against a mock without any
/// network access.
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Creates a web agent from the configured agent payload.
    async fn create_web_agent(&self) -> Result<AgentRecord, ClientError>;

    /// Requests a short-lived session token for `agent_id`.
    ///
    /// The response is returned as-is; callers must check
    /// [`SessionTokenResponse::token`] before trusting it.
    async fn get_session_token(
        &self,
        agent_id: &AgentId,
    ) -> Result<SessionTokenResponse, ClientError>;

    /// Starts a conversation with the default agent.
    ///
    /// Fetches a session token first; the conversation request is only sent
    /// once that succeeds with a usable token.
    async fn start_conversation(&self) -> Result<ConversationRecord, ClientError>;
}

/// Connection settings for [`BlandClient`].
#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub api_url: String,
    pub web_url: String,
    pub api_key: ApiKey,
    pub default_agent_id: Option<AgentId>,
    pub timeout: Duration,
}

impl ClientSettings {
    /// Settings pointing at the public Bland endpoints.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            api_key,
            default_agent_id: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// An implementation of `AgentApi` that talks to the Bland HTTP API.
pub struct BlandClient {
    http: reqwest::Client,
    api_url: Url,
    web_url: Url,
    api_key: ApiKey,
    default_agent_id: Option<AgentId>,
    agent_config: Arc<AgentConfig>,
}

impl BlandClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `settings` - Base URLs, credential, default agent and per-call timeout.
    /// * `agent_config` - The payload sent by [`AgentApi::create_web_agent`].
    pub fn new(settings: ClientSettings, agent_config: Arc<AgentConfig>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        info!(
            api_url = %settings.api_url,
            web_url = %settings.web_url,
            api_key = %settings.api_key.redacted(),
            timeout_ms = settings.timeout.as_millis() as u64,
            "Bland client initialized"
        );

        Ok(Self {
            http,
            api_url: parse_base_url(&settings.api_url)?,
            web_url: parse_base_url(&settings.web_url)?,
            api_key: settings.api_key,
            default_agent_id: settings.default_agent_id,
            agent_config,
        })
    }

    pub fn default_agent_id(&self) -> Option<&AgentId> {
        self.default_agent_id.as_ref()
    }
}

#[async_trait]
impl AgentApi for BlandClient {
    #[instrument(skip(self))]
    async fn create_web_agent(&self) -> Result<AgentRecord, ClientError> {
        const OP: &str = "create_web_agent";
        info!("Creating new web agent...");

        let url = endpoint(&self.api_url, &["v1", "agents"])?;
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.api_key.expose())
            .json(self.agent_config.as_ref())
            .send()
            .await
            .map_err(|e| ClientError::from_send(OP, e))
            .inspect_err(|e| error!(error = %e, "Agent creation request failed"))?;

        let record: AgentRecord = read_json(OP, response, |status, body| {
            ClientError::AgentCreation { status, body }
        })
        .await?;
        info!(agent_id = ?record.agent_id(), "Created agent");
        Ok(record)
    }

    #[instrument(skip(self, agent_id), fields(agent_id = %agent_id))]
    async fn get_session_token(
        &self,
        agent_id: &AgentId,
    ) -> Result<SessionTokenResponse, ClientError> {
        const OP: &str = "get_session_token";
        info!("Fetching session token for agent");

        let url = endpoint(&self.web_url, &["v1", "agents", agent_id.as_str(), "authorize"])?;
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.api_key.expose())
            .header(ACCEPT, "application/json")
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| ClientError::from_send(OP, e))
            .inspect_err(|e| error!(error = %e, "Session token request failed"))?;

        let session: SessionTokenResponse = read_json(OP, response, |status, body| {
            ClientError::SessionToken { status, body }
        })
        .await?;
        info!(has_token = session.token().is_some(), "Session token response received");
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn start_conversation(&self) -> Result<ConversationRecord, ClientError> {
        const OP: &str = "start_conversation";

        let agent_id = self.default_agent_id.as_ref().ok_or_else(|| {
            error!("Cannot start conversation: no default agent ID configured");
            ClientError::AgentIdentifierMissing
        })?;

        let session = self.get_session_token(agent_id).await?;
        let token = session.token().ok_or_else(|| {
            error!(%agent_id, "Session token response contained no token");
            ClientError::MalformedResponse("session token response has no token".to_string())
        })?;

        info!(%agent_id, "Starting conversation");
        let url = endpoint(&self.api_url, &["v1", "conversations"])?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "agent_id": agent_id }))
            .send()
            .await
            .map_err(|e| ClientError::from_send(OP, e))
            .inspect_err(|e| error!(error = %e, "Conversation start request failed"))?;

        let conversation: ConversationRecord = read_json(OP, response, |status, body| {
            ClientError::ConversationStart { status, body }
        })
        .await?;
        info!("Conversation started");
        Ok(conversation)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}

/// Appends percent-encoded path segments to a base URL.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidBaseUrl {
            url: base.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turns a Bland response into `T`, or into the operation's upstream error.
async fn read_json<T: DeserializeOwned>(
    operation: &'static str,
    response: Response,
    on_failure: impl FnOnce(u16, String) -> ClientError,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(operation, error = %e, "Failed to read Bland API error body");
                format!("<unreadable body: {e}>")
            }
        };
        error!(
            operation,
            status = status.as_u16(),
            status_text = status.canonical_reason().unwrap_or(""),
            error = %body,
            "Bland API returned an error"
        );
        return Err(on_failure(status.as_u16(), body));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::from_decode(operation, e))?;
    debug!(operation, body = %String::from_utf8_lossy(&bytes), "Bland API response");
    serde_json::from_slice(&bytes).map_err(|e| {
        error!(operation, error = %e, "Bland API response could not be decoded");
        ClientError::MalformedResponse(format!("{operation}: {e}"))
    })
}
