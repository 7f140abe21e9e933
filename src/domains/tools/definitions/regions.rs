//! Region list tool.

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

/// Parameters for listing regions.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RegionListParams {
    #[schemars(description = "Page number (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,

    #[schemars(description = "Items per page (default: 20, max: 200)")]
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Hide regions that currently do not accept new resources.
    #[schemars(description = "Only return regions that are currently available")]
    #[serde(default)]
    pub available_only: bool,
}

/// Region list tool.
pub struct RegionListTool;

impl RegionListTool {
    pub const NAME: &'static str = "region_list";

    pub const DESCRIPTION: &'static str = "List DigitalOcean regions (datacenters) with their slug, name, availability, features and the droplet sizes they offer.";

    #[instrument(skip_all)]
    pub async fn execute(params: &RegionListParams, api: &dyn CloudApi) -> CallToolResult {
        info!("Listing regions");
        into_call_result(Self::fetch(params, api).await)
    }

    async fn fetch(params: &RegionListParams, api: &dyn CloudApi) -> Result<Value, ToolError> {
        let body = api
            .get_json("/v2/regions", &page_query(params.page, params.per_page))
            .await?;
        let total = total_count(&body);

        let regions = match extract(body, "regions")? {
            Value::Array(items) => items
                .into_iter()
                .filter(|region| {
                    !params.available_only
                        || region.get("available").and_then(Value::as_bool) == Some(true)
                })
                .collect::<Vec<_>>(),
            _ => return Err(ToolError::unexpected_response("'regions' is not an array")),
        };

        Ok(json!({
            "regions": regions,
            "total": total,
        }))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RegionListParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("List regions".into()),
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
                let params: RegionListParams = parse_params(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::StaticApi;

    #[tokio::test]
    async fn test_region_list_available_only() {
        let api = StaticApi::new().with(
            "/v2/regions",
            json!({
                "regions": [
                    { "slug": "nyc1", "available": true },
                    { "slug": "ams2", "available": false }
                ],
                "meta": { "total": 2 }
            }),
        );
        let params = RegionListParams {
            page: 1,
            per_page: 20,
            available_only: true,
        };

        let result = RegionListTool::execute(&params, &api).await;
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["regions"].as_array().unwrap().len(), 1);
        assert_eq!(structured["regions"][0]["slug"], "nyc1");
        assert_eq!(structured["total"], 2);
    }
}
