//! HTTP router for the Codexrun server.
//!
//! Provides endpoints for:
//! - MCP streamable HTTP transport (`/mcp`)
//! - Health check (`/health`)

use axum::{response::IntoResponse, routing::get, Json, Router};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use codexrun_codex_sdk::CodexExecutor;

use crate::mcp;

/// Create the HTTP router.
pub fn create_router(executor: CodexExecutor, ct: CancellationToken) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .merge(mcp::create_mcp_router(executor, ct))
        .layer(cors)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
