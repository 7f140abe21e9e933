//! Transport service - runs the selected transport.
//!
//! This is the single blocking "serve" call of a process: it takes ownership
//! of the server, binds the selected transport and returns only when serving
//! ends.

use tracing::info;

use super::stdio::StdioTransport;
use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

use super::http::HttpTransport;
#[cfg(unix)]
use super::unix::UnixSocketTransport;

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Start the transport with the given MCP server.
    ///
    /// Blocks until the transport shuts down: end of stdin for stdio, a serve
    /// loop error for the HTTP transports.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        announce(&self.config);

        match self.config {
            TransportConfig::Stdio => StdioTransport::run(server).await,
            TransportConfig::UnixSocket(cfg) => run_unix_socket(cfg, server).await,
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server).await,
        }
    }
}

/// Log the transport about to start.
fn announce(config: &TransportConfig) {
    info!(mode = %config.mode(), "Transport: {}", config.description());
    match config {
        TransportConfig::Stdio => info!("Starting MCP server in stdio mode"),
        TransportConfig::UnixSocket(_) | TransportConfig::Http(_) => {
            info!("Starting MCP server in HTTP mode")
        }
    }
}

#[cfg(unix)]
async fn run_unix_socket(
    cfg: super::UnixSocketConfig,
    server: McpServer,
) -> TransportResult<()> {
    UnixSocketTransport::new(cfg).run(server).await
}

#[cfg(not(unix))]
async fn run_unix_socket(
    cfg: super::UnixSocketConfig,
    _server: McpServer,
) -> TransportResult<()> {
    Err(super::TransportError::bind(
        cfg.path.display().to_string(),
        std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "UNIX sockets are not supported on this platform",
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::HttpOptionsConfig;
    use crate::core::env::MapEnvironment;
    use crate::core::startup::StartupConfig;
    use crate::core::test_support::LogCapture;

    fn announced(args: &[&str]) -> String {
        let argv = std::iter::once("mcp-digitalocean").chain(args.iter().copied());
        let startup = StartupConfig::resolve(argv, &MapEnvironment::new()).unwrap();
        let config = TransportConfig::from_startup(&startup, &HttpOptionsConfig::default()).unwrap();

        let logs = LogCapture::new();
        tracing::subscriber::with_default(logs.subscriber(), || announce(&config));
        logs.output()
    }

    #[test]
    fn test_no_arguments_announces_stdio() {
        let output = announced(&[]);
        assert!(output.contains("Starting MCP server in stdio mode"));
        assert!(output.contains("mode=stdio"));
        assert!(!output.contains("HTTP mode"));
    }

    #[test]
    fn test_unix_socket_announces_http_mode() {
        let output = announced(&["--unix", "/tmp/test.sock"]);
        assert!(output.contains("Starting MCP server in HTTP mode"));
        assert!(output.contains("/tmp/test.sock"));
    }

    #[test]
    fn test_http_announces_http_mode() {
        let output = announced(&["--http", "127.0.0.1:9090"]);
        assert!(output.contains("Starting MCP server in HTTP mode"));
        assert!(output.contains("mode=http"));
    }
}
