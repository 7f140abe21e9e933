//! Configuration management for the MCP server.
//!
//! Ambient settings that are not part of transport selection: server identity,
//! logging, the DigitalOcean API endpoint and streamable-HTTP options. They are
//! populated from environment variables on top of defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use super::env::ProcessEnvironment;

/// Default DigitalOcean API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.digitalocean.com";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// DigitalOcean API client configuration.
    pub api: ApiConfig,

    /// Options shared by the UNIX socket and TCP HTTP transports.
    pub http: HttpOptionsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// DigitalOcean API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base endpoint, without the `/v2` prefix.
    pub endpoint: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Streamable-HTTP options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpOptionsConfig {
    /// Path the MCP endpoint is mounted on.
    pub mcp_path: String,

    /// Enable permissive CORS for browser clients.
    pub enable_cors: bool,

    /// Interval between SSE keep-alive comments, in seconds. 0 disables them.
    pub sse_keep_alive_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl HttpOptionsConfig {
    pub fn sse_keep_alive(&self) -> Option<Duration> {
        (self.sse_keep_alive_secs > 0).then(|| Duration::from_secs(self.sse_keep_alive_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for HttpOptionsConfig {
    fn default() -> Self {
        Self {
            mcp_path: "/mcp".to_string(),
            enable_cors: true,
            sse_keep_alive_secs: 15,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            api: ApiConfig::default(),
            http: HttpOptionsConfig::default(),
        }
    }
}

impl LoggingConfig {
    /// Read the log level alone, before the logger exists.
    pub fn from_env(env: &dyn ProcessEnvironment) -> Self {
        let mut config = Self::default();
        if let Some(level) = env.non_empty_var("MCP_LOG_LEVEL") {
            config.level = level;
        }
        config
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_HTTP_PATH`, ...); API settings use `DO_API_URL`
    /// and `DO_API_TIMEOUT_SECS`.
    pub fn from_env(env: &dyn ProcessEnvironment) -> Self {
        let mut config = Self::default();

        if let Some(name) = env.non_empty_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env(env);

        if let Some(endpoint) = env.non_empty_var("DO_API_URL") {
            info!("Using DigitalOcean API endpoint {}", endpoint);
            config.api.endpoint = endpoint;
        }

        if let Some(timeout) = env.non_empty_var("DO_API_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.api.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid DO_API_TIMEOUT_SECS '{}', using {}s",
                    timeout, config.api.timeout_secs
                ),
            }
        }

        if let Some(path) = env.non_empty_var("MCP_HTTP_PATH") {
            // The MCP endpoint is nested under this path; the root is taken
            // by the service descriptor.
            let trimmed = path.trim_matches('/');
            if trimmed.is_empty() {
                warn!(
                    "Ignoring MCP_HTTP_PATH '{}': the MCP endpoint cannot be mounted at the root, using {}",
                    path, config.http.mcp_path
                );
            } else {
                config.http.mcp_path = format!("/{}", trimmed);
            }
        }

        if let Some(cors) = env.var("MCP_HTTP_CORS") {
            config.http.enable_cors = cors.to_lowercase() != "false" && cors != "0";
        }

        if let Some(keep_alive) = env.non_empty_var("MCP_HTTP_SSE_KEEP_ALIVE_SECS") {
            match keep_alive.parse() {
                Ok(secs) => config.http.sse_keep_alive_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid MCP_HTTP_SSE_KEEP_ALIVE_SECS '{}'",
                    keep_alive
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MapEnvironment;

    #[test]
    fn test_defaults() {
        let config = Config::from_env(&MapEnvironment::new());
        assert_eq!(config.server.name, "mcp-digitalocean");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.api.endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.http.mcp_path, "/mcp");
        assert!(config.http.enable_cors);
        assert_eq!(config.http.sse_keep_alive(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_overrides_from_env() {
        let env = MapEnvironment::new()
            .with("MCP_SERVER_NAME", "do-test")
            .with("MCP_LOG_LEVEL", "debug")
            .with("DO_API_URL", "http://127.0.0.1:4010")
            .with("DO_API_TIMEOUT_SECS", "5")
            .with("MCP_HTTP_PATH", "rpc")
            .with("MCP_HTTP_CORS", "false")
            .with("MCP_HTTP_SSE_KEEP_ALIVE_SECS", "0");

        let config = Config::from_env(&env);
        assert_eq!(config.server.name, "do-test");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.api.endpoint, "http://127.0.0.1:4010");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.http.mcp_path, "/rpc");
        assert!(!config.http.enable_cors);
        assert_eq!(config.http.sse_keep_alive(), None);
    }

    #[test]
    fn test_invalid_numbers_keep_defaults() {
        let env = MapEnvironment::new()
            .with("DO_API_TIMEOUT_SECS", "soon")
            .with("MCP_HTTP_SSE_KEEP_ALIVE_SECS", "-1");

        let config = Config::from_env(&env);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.http.sse_keep_alive_secs, 15);
    }

    #[test]
    fn test_root_mcp_path_keeps_default() {
        for path in ["/", "//", "///"] {
            let config = Config::from_env(&MapEnvironment::new().with("MCP_HTTP_PATH", path));
            assert_eq!(config.http.mcp_path, "/mcp", "MCP_HTTP_PATH={:?}", path);
        }
    }

    #[test]
    fn test_mcp_path_slashes_are_normalized() {
        let config = Config::from_env(&MapEnvironment::new().with("MCP_HTTP_PATH", "/rpc/"));
        assert_eq!(config.http.mcp_path, "/rpc");
    }
}
