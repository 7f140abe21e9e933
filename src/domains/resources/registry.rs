//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, ResourceTemplate};

use super::definitions::{
    AccountResource, DropletResourceTemplate, ResourceDefinition, ServerInfoResource,
};
use super::service::ResourceEntry;
use crate::core::config::ServerConfig;

/// Helper function to create an annotated resource from a definition.
fn build_resource<R: ResourceDefinition>(server: &ServerConfig) -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(server),
    }
}

/// Get all registered resources as ResourceEntries.
pub fn get_all_resources(server: &ServerConfig) -> Vec<ResourceEntry> {
    vec![
        build_resource::<AccountResource>(server),
        build_resource::<ServerInfoResource>(server),
    ]
}

/// Get all registered resource templates.
///
/// Resource templates use URI templates (RFC 6570) to describe
/// parameterized resources that clients can fill in.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: DropletResourceTemplate::URI_TEMPLATE.to_string(),
            name: DropletResourceTemplate::NAME.to_string(),
            title: Some(DropletResourceTemplate::TITLE.to_string()),
            description: Some(DropletResourceTemplate::DESCRIPTION.to_string()),
            mime_type: Some(DropletResourceTemplate::MIME_TYPE.to_string()),
        }
        .no_annotation(),
    ]
}

/// Get the list of all resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![AccountResource::URI, ServerInfoResource::URI]
}
