//! Droplet tools.
//!
//! Listing droplets returns a compact summary per droplet; fetching a single
//! droplet returns the full API object.

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{
    default_page, default_per_page, extract, into_call_result, page_query, parse_params,
    total_count,
};
use crate::api::CloudApi;
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for listing droplets.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DropletListParams {
    /// Page number, starting at 1.
    #[schemars(description = "Page number (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page.
    #[schemars(description = "Items per page (default: 20, max: 200)")]
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Only list droplets carrying this tag.
    #[schemars(description = "Only return droplets with this tag")]
    #[serde(default)]
    pub tag_name: Option<String>,
}

/// Parameters for fetching one droplet.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DropletGetParams {
    /// Droplet ID.
    #[schemars(description = "Numeric droplet ID")]
    pub id: u64,
}

// ============================================================================
// droplet_list
// ============================================================================

/// Droplet list tool.
pub struct DropletListTool;

impl DropletListTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "droplet_list";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List droplets (virtual machines) in the account, optionally filtered by tag. Returns ID, name, status, region, size, image and public IPv4 address of each droplet, plus the total count.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(page = params.page, tag = ?params.tag_name))]
    pub async fn execute(params: &DropletListParams, api: &dyn CloudApi) -> CallToolResult {
        info!("Listing droplets");
        into_call_result(Self::fetch(params, api).await)
    }

    async fn fetch(params: &DropletListParams, api: &dyn CloudApi) -> Result<Value, ToolError> {
        let mut query = page_query(params.page, params.per_page);
        if let Some(tag) = params.tag_name.as_ref().filter(|t| !t.is_empty()) {
            query.push(("tag_name", tag.clone()));
        }

        let body = api.get_json("/v2/droplets", &query).await?;
        let total = total_count(&body);
        let droplets = match extract(body, "droplets")? {
            Value::Array(items) => items.iter().map(summarize_droplet).collect::<Vec<_>>(),
            _ => return Err(ToolError::unexpected_response("'droplets' is not an array")),
        };

        info!("Listed {} droplets", droplets.len());

        Ok(json!({
            "droplets": droplets,
            "total": total,
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DropletListParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("List droplets".into()),
        }
    }

    /// Create a ToolRoute bound to an API client.
    pub fn create_route<S>(api: Arc<dyn CloudApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let api = api.clone();
            async move {
                let params: DropletListParams = parse_params(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// droplet_get
// ============================================================================

/// Droplet detail tool.
pub struct DropletGetTool;

impl DropletGetTool {
    pub const NAME: &'static str = "droplet_get";

    pub const DESCRIPTION: &'static str = "Get the full details of a single droplet by its numeric ID, including networks, volumes, features and backup settings.";

    #[instrument(skip_all, fields(id = params.id))]
    pub async fn execute(params: &DropletGetParams, api: &dyn CloudApi) -> CallToolResult {
        info!("Fetching droplet");
        into_call_result(Self::fetch(params, api).await)
    }

    async fn fetch(params: &DropletGetParams, api: &dyn CloudApi) -> Result<Value, ToolError> {
        if params.id == 0 {
            return Err(ToolError::invalid_arguments("droplet ID must be positive"));
        }
        let body = api
            .get_json(&format!("/v2/droplets/{}", params.id), &[])
            .await?;
        extract(body, "droplet")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DropletGetParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Get droplet".into()),
        }
    }

    pub fn create_route<S>(api: Arc<dyn CloudApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let api = api.clone();
            async move {
                let params: DropletGetParams = parse_params(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Reduce a droplet object to the fields useful in a listing.
fn summarize_droplet(droplet: &Value) -> Value {
    let public_ipv4 = droplet
        .pointer("/networks/v4")
        .and_then(Value::as_array)
        .and_then(|nets| {
            nets.iter()
                .find(|net| net.get("type").and_then(Value::as_str) == Some("public"))
        })
        .and_then(|net| net.get("ip_address"))
        .cloned()
        .unwrap_or(Value::Null);

    json!({
        "id": droplet.get("id"),
        "name": droplet.get("name"),
        "status": droplet.get("status"),
        "region": droplet.pointer("/region/slug"),
        "size": droplet.get("size_slug"),
        "image": droplet.pointer("/image/slug").or_else(|| droplet.pointer("/image/name")),
        "public_ipv4": public_ipv4,
        "tags": droplet.get("tags"),
    })
}
