//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. Static entries
//! come from `registry.rs`; API-backed entries and the droplet template are
//! resolved through the API client on every read.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::definitions::DropletResourceTemplate;
use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::api::CloudApi;
use crate::core::config::ServerConfig;

const JSON_MIME_TYPE: &str = "application/json";

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// API client used by API-backed resources.
    api: Arc<dyn CloudApi>,

    /// Registry of available resources.
    /// Key: resource URI, Value: resource metadata
    resources: HashMap<String, ResourceEntry>,

    /// Resource templates for parameterized resources.
    templates: Vec<ResourceTemplate>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// A field of an API response, fetched on read.
    Api {
        path: &'static str,
        field: &'static str,
    },
}

impl ResourceService {
    /// Create a new ResourceService backed by the given API client.
    pub fn new(api: Arc<dyn CloudApi>, server: &ServerConfig) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            api,
            resources: HashMap::new(),
            templates: get_all_resource_templates(),
        };

        for entry in get_all_resources(server) {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        let mut resources: Vec<_> = self
            .resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect();
        resources.sort_by(|a, b| a.raw.uri.cmp(&b.raw.uri));
        resources
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let content = match self.resources.get(uri) {
            Some(entry) => match &entry.content {
                ResourceContent::Text(text) => text_contents(uri, text.clone(), &entry.resource),
                ResourceContent::Api { path, field } => {
                    self.fetch_json(uri, path, field).await?
                }
            },
            None if DropletResourceTemplate::matches(uri) => {
                let id = DropletResourceTemplate::droplet_id(uri)
                    .ok_or_else(|| ResourceError::invalid_uri(uri))?;
                self.fetch_json(uri, &format!("/v2/droplets/{}", id), "droplet")
                    .await?
            }
            None => return Err(ResourceError::not_found(uri)),
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    /// Fetch an API path and return one field of the body as JSON text.
    async fn fetch_json(
        &self,
        uri: &str,
        path: &str,
        field: &str,
    ) -> Result<ResourceContents, ResourceError> {
        let body = self.api.get_json(path, &[]).await.map_err(|e| {
            if e.is_not_found() {
                ResourceError::not_found(uri)
            } else {
                ResourceError::Api(e)
            }
        })?;

        let value = match body {
            Value::Object(mut map) => map
                .remove(field)
                .ok_or_else(|| ResourceError::internal(format!("response has no '{}' field", field)))?,
            _ => return Err(ResourceError::internal("response is not a JSON object")),
        };

        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| ResourceError::internal(e.to_string()))?;

        Ok(ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some(JSON_MIME_TYPE.to_string()),
            text,
            meta: None,
        })
    }
}

fn text_contents(uri: &str, text: String, resource: &Resource) -> ResourceContents {
    ResourceContents::TextResourceContents {
        uri: uri.to_string(),
        mime_type: resource.raw.mime_type.clone(),
        text,
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::StaticApi;
    use serde_json::json;

    fn service() -> ResourceService {
        let api = StaticApi::new()
            .with("/v2/account", json!({ "account": { "email": "ops@example.com" } }))
            .with("/v2/droplets/42", json!({ "droplet": { "id": 42, "name": "db" } }));
        ResourceService::new(Arc::new(api), &ServerConfig::default())
    }

    fn text_of(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            other => panic!("expected text contents, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_resources() {
        let resources = service().list_resources().await;
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].raw.uri, "do://account");
    }

    #[tokio::test]
    async fn test_read_account_resource() {
        let result = service().read_resource("do://account").await.unwrap();
        assert!(text_of(&result).contains("ops@example.com"));
    }

    #[tokio::test]
    async fn test_read_server_info() {
        let result = service().read_resource("do://server/info").await.unwrap();
        assert!(text_of(&result).contains("mcp-digitalocean"));
    }

    #[tokio::test]
    async fn test_read_droplet_template() {
        let result = service().read_resource("do://droplets/42").await.unwrap();
        assert!(text_of(&result).contains("\"db\""));
    }

    #[tokio::test]
    async fn test_read_unknown_droplet_is_not_found() {
        let err = service().read_resource("do://droplets/7").await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_read_invalid_droplet_uri() {
        let err = service().read_resource("do://droplets/web").await.unwrap_err();
        assert!(matches!(err, ResourceError::InvalidUri(_)));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let err = service().read_resource("do://nothing").await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }
}
