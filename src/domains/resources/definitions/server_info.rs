//! Server info resource definition.

use super::ResourceDefinition;
use crate::core::config::ServerConfig;
use crate::domains::resources::service::ResourceContent;

/// Server information resource (static JSON built at registration).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "do://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Information about this MCP server";
    const MIME_TYPE: &'static str = "application/json";

    fn content(server: &ServerConfig) -> ResourceContent {
        let info = serde_json::json!({
            "server": server.name,
            "version": server.version,
            "api": "https://docs.digitalocean.com/reference/api/",
        });
        ResourceContent::Text(info.to_string())
    }
}
