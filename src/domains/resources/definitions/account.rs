//! Account resource definition.

use super::ResourceDefinition;
use crate::core::config::ServerConfig;
use crate::domains::resources::service::ResourceContent;

/// The authenticated account, fetched from the API on every read.
pub struct AccountResource;

impl ResourceDefinition for AccountResource {
    const URI: &'static str = "do://account";
    const NAME: &'static str = "DigitalOcean Account";
    const DESCRIPTION: &'static str =
        "The DigitalOcean account the API token belongs to, including limits and status";
    const MIME_TYPE: &'static str = "application/json";

    fn content(_server: &ServerConfig) -> ResourceContent {
        ResourceContent::Api {
            path: "/v2/account",
            field: "account",
        }
    }
}
