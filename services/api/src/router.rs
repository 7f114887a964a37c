//! Axum Router Configuration
//!
//! This module defines the HTTP routing for the service, including the token
//! endpoint, the health check, and the OpenAPI documentation.

use crate::{
    handlers,
    models::{ErrorResponse, HealthResponse, TokenRequest, TokenResponse},
    state::AppState,
};

use axum::{
    Router,
    routing::{any, get},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::get_token, handlers::health),
    components(schemas(TokenRequest, TokenResponse, ErrorResponse, HealthResponse)),
    tags(
        (name = "Bland Voice API", description = "Session tokens for Bland AI web agents")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/api/getToken", any(handlers::get_token))
        .route("/health", get(handlers::health))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
