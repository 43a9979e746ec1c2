//! HTTP routes for the tool server

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::metrics;
use crate::tools::error::INTERNAL_ERROR;
use crate::tools::{RpcRequest, RpcResponse};

use super::AppState;

// ============================================================================
// Response Types
// ============================================================================

/// Service description served on `GET /`
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub tools: usize,
    pub available_sports: Vec<String>,
    pub base_url: String,
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

// ============================================================================
// Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info).post(rpc))
        .route("/mcp", axum::routing::post(rpc))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_text))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn service_info(State(state): State<AppState>) -> impl IntoResponse {
    let dispatcher = state.handler.dispatcher();

    Json(ServiceInfo {
        service: "Athletics MCP Server".to_string(),
        status: "running".to_string(),
        tools: dispatcher.tool_set().tools().len(),
        available_sports: dispatcher.aggregator().catalog().available().to_vec(),
        base_url: state.base_url.clone(),
    })
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn metrics_text() -> axum::response::Response {
    match metrics::encode_metrics() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// JSON-RPC endpoint
///
/// The body is decoded by hand so malformed JSON gets a JSON-RPC parse
/// error instead of axum's plain-text rejection.
async fn rpc(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let response = match serde_json::from_slice::<RpcRequest>(&body) {
        Ok(request) => state.handler.handle(request).await,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected undecodable request body");
            RpcResponse::decode_error(&e)
        }
    };

    (status_for(&response), Json(response))
}

/// HTTP status for a JSON-RPC response
///
/// Execution failures are server errors; every other error code is the
/// client's fault.
pub fn status_for(response: &RpcResponse) -> StatusCode {
    match response.error_code() {
        None => StatusCode::OK,
        Some(INTERNAL_ERROR) => StatusCode::INTERNAL_SERVER_ERROR,
        Some(_) => StatusCode::BAD_REQUEST,
    }
}
