//! Transport layer for the MCP server.
//!
//! Exactly one transport is active per process:
//! - **STDIO**: standard input/output, the default for MCP clients
//! - **UNIX socket**: streamable HTTP (SSE) served on a UNIX domain socket
//! - **HTTP**: streamable HTTP (SSE) served on a TCP address
//!
//! [`TransportSelector`] picks the transport from the startup configuration,
//! [`TransportService`] binds it and blocks serving requests.

mod config;
mod error;
pub mod http;
mod selector;
mod service;
pub mod stdio;
#[cfg(unix)]
pub mod unix;

pub use config::{HttpConfig, StreamableHttpConfig, TransportConfig, UnixSocketConfig};
pub use error::{TransportError, TransportResult};
pub use selector::{TransportMode, TransportSelector};
pub use service::TransportService;
