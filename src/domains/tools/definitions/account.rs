//! Account tools.
//!
//! Read-only views of the authenticated account and its billing balance.

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{extract, into_call_result, parse_params};
use crate::api::CloudApi;
use crate::domains::tools::ToolError;

/// The account tools take no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

// ============================================================================
// account_get
// ============================================================================

/// Account tool - returns the account the token belongs to.
pub struct AccountGetTool;

impl AccountGetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "account_get";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get information about the DigitalOcean account the API token belongs to: email, status, droplet and volume limits, and team.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(api: &dyn CloudApi) -> CallToolResult {
        info!("Fetching account information");
        into_call_result(Self::fetch(api).await)
    }

    async fn fetch(api: &dyn CloudApi) -> Result<Value, ToolError> {
        let body = api.get_json("/v2/account", &[]).await?;
        extract(body, "account")
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Account".into()),
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
                let _: NoParams = parse_params(args)?;
                Ok(Self::execute(api.as_ref()).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// balance_get
// ============================================================================

/// Balance tool - returns the month-to-date balance and usage.
pub struct BalanceGetTool;

impl BalanceGetTool {
    pub const NAME: &'static str = "balance_get";

    pub const DESCRIPTION: &'static str = "Get the DigitalOcean account balance: month-to-date balance, month-to-date usage and account balance, as of the last generation time.";

    #[instrument(skip_all)]
    pub async fn execute(api: &dyn CloudApi) -> CallToolResult {
        info!("Fetching account balance");
        into_call_result(
            api.get_json("/v2/customers/my/balance", &[])
                .await
                .map_err(ToolError::from),
        )
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Balance".into()),
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
                let _: NoParams = parse_params(args)?;
                Ok(Self::execute(api.as_ref()).await)
            }
            .boxed()
        })
    }
}
