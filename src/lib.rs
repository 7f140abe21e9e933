//! DigitalOcean MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing the DigitalOcean API over
//! stdio, a UNIX socket or TCP.
//!
//! # Architecture
//!
//! - **core**: Startup resolution, credentials, configuration, the server
//!   handler, transports and the bootstrap sequence
//! - **api**: The DigitalOcean API client
//! - **domains**: MCP capabilities organized by bounded contexts
//!   - **tools**: DigitalOcean operations clients can call
//!   - **resources**: API objects clients can read
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_digitalocean::core::{Bootstrap, FatalErrorReporter, SystemEnvironment};
//!
//! #[tokio::main]
//! async fn main() -> std::process::ExitCode {
//!     let env = SystemEnvironment::load();
//!     match Bootstrap::new(&env).run(std::env::args_os()).await {
//!         Ok(()) => std::process::ExitCode::SUCCESS,
//!         Err(e) => FatalErrorReporter::new(&env).report(&e),
//!     }
//! }
//! ```

pub mod api;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Bootstrap, BootstrapError, Config, McpServer, Result};
