//! Transport configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use super::selector::TransportMode;
use crate::core::config::HttpOptionsConfig;
use crate::core::error::Result;
use crate::core::startup::StartupConfig;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportConfig {
    /// Standard input/output transport.
    Stdio,

    /// Streamable HTTP served on a UNIX domain socket.
    UnixSocket(UnixSocketConfig),

    /// Streamable HTTP served on a TCP address.
    Http(HttpConfig),
}

/// UNIX socket transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnixSocketConfig {
    /// Filesystem path of the socket.
    pub path: PathBuf,

    #[serde(flatten)]
    pub http: StreamableHttpConfig,
}

/// TCP HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Bind address (`host:port`).
    pub address: String,

    #[serde(flatten)]
    pub http: StreamableHttpConfig,
}

/// Settings of the streamable-HTTP server, whatever socket it runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamableHttpConfig {
    /// Base URL clients use to reach the server.
    pub base_url: Url,

    /// Path of the MCP endpoint.
    #[serde(default = "default_mcp_path")]
    pub mcp_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,

    /// Seconds between SSE keep-alive comments; 0 disables them.
    #[serde(default = "default_sse_keep_alive")]
    pub sse_keep_alive_secs: u64,
}

fn default_mcp_path() -> String {
    HttpOptionsConfig::default().mcp_path
}

fn default_cors() -> bool {
    HttpOptionsConfig::default().enable_cors
}

fn default_sse_keep_alive() -> u64 {
    HttpOptionsConfig::default().sse_keep_alive_secs
}

impl StreamableHttpConfig {
    pub fn new(base_url: Url, options: &HttpOptionsConfig) -> Self {
        Self {
            base_url,
            mcp_path: options.mcp_path.clone(),
            enable_cors: options.enable_cors,
            sse_keep_alive_secs: options.sse_keep_alive_secs,
        }
    }

    /// Absolute URL of the MCP endpoint, keeping any path prefix of the base URL.
    pub fn endpoint_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), self.mcp_path);
        url.set_path(&path);
        url
    }

    pub fn sse_keep_alive(&self) -> Option<Duration> {
        (self.sse_keep_alive_secs > 0).then(|| Duration::from_secs(self.sse_keep_alive_secs))
    }
}

impl TransportConfig {
    /// Build the configuration of the transport the startup flags select.
    ///
    /// The base URL is only validated for the HTTP transports; stdio never
    /// advertises it.
    pub fn from_startup(startup: &StartupConfig, options: &HttpOptionsConfig) -> Result<Self> {
        let http = || -> Result<StreamableHttpConfig> {
            Ok(StreamableHttpConfig::new(startup.base_url()?, options))
        };

        Ok(match startup.transport_mode() {
            TransportMode::Stdio => Self::Stdio,
            TransportMode::UnixSocket => Self::UnixSocket(UnixSocketConfig {
                path: startup.unix_socket_path.clone().unwrap_or_default(),
                http: http()?,
            }),
            TransportMode::Http => Self::Http(HttpConfig {
                address: startup.bind_address(),
                http: http()?,
            }),
        })
    }

    /// The transport mode of this configuration.
    pub fn mode(&self) -> TransportMode {
        match self {
            Self::Stdio => TransportMode::Stdio,
            Self::UnixSocket(_) => TransportMode::UnixSocket,
            Self::Http(_) => TransportMode::Http,
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            Self::UnixSocket(cfg) => format!(
                "Streamable HTTP on UNIX socket {}{}",
                cfg.path.display(),
                cfg.http.mcp_path
            ),
            Self::Http(cfg) => format!("Streamable HTTP on {}{}", cfg.address, cfg.http.mcp_path),
        }
    }
}
