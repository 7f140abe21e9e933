//! Streamable HTTP transport.
//!
//! MCP over HTTP with server-sent events, served by rmcp's
//! `StreamableHttpService`. The same router is used on TCP (this module) and
//! on UNIX sockets (see `unix.rs`).

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::config::{HttpConfig, StreamableHttpConfig};
use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// What the root endpoint reports about the running service.
#[derive(Debug, Clone)]
struct ServiceDescriptor {
    name: String,
    version: String,
    base_url: String,
    endpoint: String,
}

/// Build the streamable-HTTP router for a server.
///
/// Every MCP session gets its own clone of `server`; clones share the API
/// client and the registered handlers.
pub fn build_router(server: McpServer, config: &StreamableHttpConfig) -> Router {
    let descriptor = Arc::new(ServiceDescriptor {
        name: server.name().to_string(),
        version: server.version().to_string(),
        base_url: config.base_url.to_string(),
        endpoint: config.endpoint_url().to_string(),
    });

    let mcp_service = StreamableHttpService::new(
        move || Ok::<_, std::io::Error>(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            sse_keep_alive: config.sse_keep_alive(),
            stateful_mode: true,
            ..Default::default()
        },
    );

    let mut app = Router::new()
        .nest_service(&config.mcp_path, mcp_service)
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(descriptor);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}

/// TCP HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> &str {
        &self.config.address
    }

    /// Bind the TCP listener.
    pub async fn bind(&self) -> TransportResult<TcpListener> {
        let addr = self.address();
        TcpListener::bind(addr)
            .await
            .map_err(|e| TransportError::bind(addr, e))
    }

    /// Run the HTTP transport. Returns only when the serve loop fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let listener = self.bind().await?;
        info!(address = %self.address(), "Listening on HTTP address");
        self.serve(listener, server).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(self, listener: TcpListener, server: McpServer) -> TransportResult<()> {
        let app = build_router(server, &self.config.http);

        info!("  → MCP:    {}", self.config.http.endpoint_url());
        info!("  → Health: GET /health");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Root handler - provides service info.
async fn root_handler(State(descriptor): State<Arc<ServiceDescriptor>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": descriptor.name,
        "version": descriptor.version,
        "transport": "streamable-http",
        "baseUrl": descriptor.base_url,
        "endpoints": {
            "mcp": descriptor.endpoint,
            "health": "/health"
        },
        "protocol": "MCP (JSON-RPC 2.0 over HTTP + SSE)"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
