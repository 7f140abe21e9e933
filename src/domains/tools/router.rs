//! Tool Router - builds the rmcp ToolRouter.
//!
//! Every route holds its own handle on the API client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    AccountGetTool, BalanceGetTool, DropletGetTool, DropletListTool, RegionListTool,
};
use crate::api::CloudApi;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(api: Arc<dyn CloudApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(AccountGetTool::create_route(api.clone()))
        .with_route(BalanceGetTool::create_route(api.clone()))
        .with_route(DropletListTool::create_route(api.clone()))
        .with_route(DropletGetTool::create_route(api.clone()))
        .with_route(RegionListTool::create_route(api))
}
