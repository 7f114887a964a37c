//! API Models
//!
//! Request and response bodies for the HTTP boundary, with `utoipa` schemas
//! for the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/getToken`.
///
/// `agentId` must be a string. A non-string value, or a body that sets both
/// `agentId` and `agent_id`, fails to parse and is answered with 400 like a
/// missing identifier.
#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct TokenRequest {
    /// The Bland agent to authorize. `agent_id` is accepted as well.
    #[serde(default, rename = "agentId", alias = "agent_id")]
    #[schema(example = "abc123")]
    pub agent_id: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct TokenResponse {
    #[schema(example = "tok_xyz")]
    pub token: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
