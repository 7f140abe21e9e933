//! MCP Server implementation.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool,
//! and the ToolRouter is built in `domains/tools/router.rs`. Adding a new
//! tool does not require modifying this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::ServerConfig;
use crate::api::CloudApi;
use crate::domains::{
    resources::{ResourceError, ResourceService},
    tools::build_tool_router,
};

/// The main MCP server handler.
///
/// Cloning is cheap: every clone shares the same API client and services,
/// which lets the HTTP transports hand one instance to each session.
#[derive(Clone)]
pub struct McpServer {
    /// Server identity.
    config: Arc<ServerConfig>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server bound to an API client.
    pub fn new(config: ServerConfig, api: Arc<dyn CloudApi>) -> Self {
        let resource_service = Arc::new(ResourceService::new(api.clone(), &config));
        let tool_router = build_tool_router::<Self>(api);

        let tools: Vec<_> = tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        info!("Registered {} tools: {}", tools.len(), tools.join(", "));

        Self {
            config: Arc::new(config),
            resource_service,
            tool_router,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.version
    }

    /// Names of the registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

/// Map a resource failure onto the MCP error sent to the client.
fn resource_error(err: ResourceError) -> McpError {
    match err {
        ResourceError::NotFound(_) => McpError::resource_not_found(err.to_string(), None),
        ResourceError::InvalidUri(_) => McpError::invalid_params(err.to_string(), None),
        ResourceError::Api(_) | ResourceError::Internal(_) => {
            McpError::internal_error(err.to_string(), None)
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.name.clone(),
                version: self.config.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "DigitalOcean MCP server. Use the tools to inspect the account, balance, \
                 droplets and regions; read do://account or do://droplets/{id} for raw API objects."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(resource_error)
    }
}
