//! Axum Handlers for the REST API
//!
//! The token endpoint and a health check. The token endpoint is the single
//! place where client errors are turned into HTTP statuses.

use axum::{
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use bland_core::{AgentId, ClientError};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::{
    models::{ErrorResponse, HealthResponse, TokenRequest, TokenResponse},
    state::AppState,
};

#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    BadRequest(String),
    MissingToken,
    Upstream(ClientError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                Json(ErrorResponse {
                    message: "Method not allowed".to_string(),
                }),
            )
                .into_response(),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::MissingToken => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    message: "No token received from Bland AI".to_string(),
                }),
            )
                .into_response(),
            // Already logged by the client where it was detected.
            ApiError::Upstream(err) => {
                let status = if err.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (
                    status,
                    Json(ErrorResponse {
                        message: err.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        Self::Upstream(err)
    }
}

/// Issue a short-lived Bland session token for an agent.
///
/// Accepts any method so that non-POST requests get a JSON 405 instead of the
/// router's empty one.
#[utoipa::path(
    post,
    path = "/api/getToken",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Session token issued", body = TokenResponse),
        (status = 400, description = "Agent ID missing or empty", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Bland AI request failed", body = ErrorResponse),
        (status = 504, description = "Bland AI request timed out", body = ErrorResponse)
    )
)]
#[instrument(name = "get_token", skip_all, fields(method = %method))]
pub async fn get_token(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<Json<TokenResponse>, ApiError> {
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let request: TokenRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejecting token request with unreadable body");
        ApiError::BadRequest("Agent ID is required".to_string())
    })?;

    let agent_id = request
        .agent_id
        .as_deref()
        .and_then(|raw| AgentId::parse(raw).ok())
        .ok_or_else(|| ApiError::BadRequest("Agent ID is required".to_string()))?;

    let session = state.agent_api.get_session_token(&agent_id).await?;

    let token = session.token().ok_or_else(|| {
        warn!(%agent_id, "Bland AI returned no session token");
        ApiError::MissingToken
    })?;

    Ok(Json(TokenResponse {
        token: token.to_string(),
    }))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
