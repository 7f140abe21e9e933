//! Droplet resource template.

/// `do://droplets/{id}`: a single droplet by numeric ID.
pub struct DropletResourceTemplate;

impl DropletResourceTemplate {
    pub const URI_TEMPLATE: &'static str = "do://droplets/{id}";
    pub const NAME: &'static str = "Droplet";
    pub const TITLE: &'static str = "DigitalOcean Droplet";
    pub const DESCRIPTION: &'static str = "A droplet (virtual machine) by its numeric ID";
    pub const MIME_TYPE: &'static str = "application/json";

    const PREFIX: &'static str = "do://droplets/";

    /// Whether a URI belongs to this template.
    pub fn matches(uri: &str) -> bool {
        uri.starts_with(Self::PREFIX)
    }

    /// Extract the droplet ID from a matching URI.
    pub fn droplet_id(uri: &str) -> Option<u64> {
        uri.strip_prefix(Self::PREFIX)?
            .parse()
            .ok()
            .filter(|id| *id > 0)
    }
}
