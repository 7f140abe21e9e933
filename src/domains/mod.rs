//! Domains module containing the handler registry.
//!
//! Each subdomain maps MCP requests onto DigitalOcean API calls:
//! - **tools**: operations clients can call
//! - **resources**: documents clients can read

pub mod resources;
pub mod tools;
