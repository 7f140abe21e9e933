//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server:
//! startup resolution, credential validation, configuration, the server
//! handler, the transport layer and the bootstrap sequence tying them together.

pub mod bootstrap;
pub mod config;
pub mod credentials;
pub mod env;
pub mod error;
pub mod reporter;
pub mod server;
pub mod startup;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use bootstrap::Bootstrap;
pub use config::Config;
pub use credentials::{ApiToken, CredentialGuard};
pub use env::{ProcessEnvironment, SystemEnvironment};
pub use error::{BootstrapError, Result, Stage};
pub use reporter::FatalErrorReporter;
pub use server::McpServer;
pub use startup::StartupConfig;
pub use transport::{TransportConfig, TransportMode, TransportService};
