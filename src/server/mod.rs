//! HTTP transport for the tool protocol
//!
//! Serves JSON-RPC on `POST /` and `POST /mcp`, plus service info, liveness
//! and Prometheus metrics.

pub mod api;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::aggregator::Aggregator;
use crate::config::{Config, ServerConfig};
use crate::crawler::Extractor;
use crate::metrics;
use crate::tools::{ErrorStyle, ProtocolHandler, ToolDispatcher, ToolSet};

pub use api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Protocol handler serving the full tool set
    pub handler: Arc<ProtocolHandler>,

    /// Site base URL, reported on the info route
    pub base_url: String,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(aggregator: Aggregator, base_url: impl Into<String>) -> Self {
        let dispatcher = ToolDispatcher::new(aggregator, ToolSet::Full);
        Self {
            handler: Arc::new(ProtocolHandler::new(dispatcher, ErrorStyle::RpcError)),
            base_url: base_url.into(),
            start_time: Instant::now(),
        }
    }
}

// ============================================================================
// Server
// ============================================================================

/// HTTP tool server
pub struct AthleticsServer {
    config: ServerConfig,
    state: AppState,
}

impl AthleticsServer {
    /// Create a server backed by the live site
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let extractor = Extractor::new(config).map_err(|e| ServerError::Init(e.to_string()))?;
        let aggregator = Aggregator::new(extractor, config.catalog());

        Ok(Self::with_aggregator(config, aggregator))
    }

    /// Create a server over an existing aggregator
    pub fn with_aggregator(config: &Config, aggregator: Aggregator) -> Self {
        Self {
            config: config.server.clone(),
            state: AppState::new(aggregator, config.site.base_url.clone()),
        }
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.config.bind_address
    }

    /// Build the router with all routes and configured layers
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Serve until `shutdown_signal` resolves
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.config.bind_address;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        let tools = self.state.handler.dispatcher().list();
        tracing::info!(
            address = %addr,
            tools = tools.len(),
            metrics = metrics::metrics_initialized(),
            "Athletics tool server listening"
        );
        for tool in &tools {
            tracing::debug!(tool = tool.name, "Tool registered");
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

// ============================================================================
// Server Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization error: {0}")]
    Init(String),

    #[error("Failed to bind: {0}")]
    Bind(String),

    #[error("Server error: {0}")]
    Serve(String),
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
