//! Startup configuration resolved from the command line and the environment.
//!
//! [`StartupConfig`] is built once at process start and never changes. It
//! carries the raw transport flags; the transport actually used is derived
//! from them by [`TransportSelector`](super::transport::TransportSelector).

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use url::{ParseError, Url};

use super::credentials::CREDENTIAL_VAR;
use super::env::ProcessEnvironment;
use super::error::{BootstrapError, Result};
use super::transport::{TransportMode, TransportSelector};

/// Default TCP bind address for the HTTP transport.
pub const DEFAULT_HTTP_ADDRESS: &str = ":8080";

/// Default base URL advertised by the HTTP transports.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Command-line flags.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mcp-digitalocean",
    version,
    about = "MCP server for the DigitalOcean API",
    long_about = "MCP server for the DigitalOcean API.\n\n\
                  Runs in stdio mode when started without arguments. \
                  The API token is read from the DO_TOKEN environment variable."
)]
pub struct Cli {
    /// Run server in stdio mode.
    #[arg(long, default_value_t = false)]
    pub stdio: bool,

    /// HTTP bind address (ignored if --unix is set).
    #[arg(long = "http", value_name = "ADDR", default_value = DEFAULT_HTTP_ADDRESS)]
    pub http_address: String,

    /// Path to UNIX socket (if set, takes precedence over --http).
    #[arg(long = "unix", value_name = "PATH", default_value = "")]
    pub unix_socket: String,

    /// Base URL for the server.
    #[arg(long = "base-url", value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Resolved startup configuration.
#[derive(Clone)]
pub struct StartupConfig {
    /// Stdio was requested with `--stdio` or forced by an empty command line.
    pub force_stdio: bool,

    /// TCP bind address as given on the command line.
    pub http_address: String,

    /// UNIX socket path; `None` when `--unix` is absent or empty.
    pub unix_socket_path: Option<PathBuf>,

    /// Base URL advertised by the HTTP transports, as given. Validated by
    /// [`StartupConfig::base_url`] once an HTTP transport is selected.
    pub base_url: String,

    /// Raw value of the credential variable, validated later by the guard.
    pub credential_token: Option<String>,
}

impl StartupConfig {
    /// Resolve the configuration from the full argument list (program name
    /// included) and the process environment.
    pub fn resolve<I, T>(args: I, env: &dyn ProcessEnvironment) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        // Only the program name: the bare invocation MCP clients use.
        let no_arguments = args.len() <= 1;
        let cli = Cli::try_parse_from(args)?;
        Ok(Self::from_cli(cli, no_arguments, env))
    }

    /// Build the configuration from already-parsed flags.
    pub fn from_cli(cli: Cli, no_arguments: bool, env: &dyn ProcessEnvironment) -> Self {
        let unix_socket_path = Some(cli.unix_socket)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self {
            force_stdio: cli.stdio || no_arguments,
            http_address: cli.http_address,
            unix_socket_path,
            base_url: cli.base_url,
            credential_token: env.var(CREDENTIAL_VAR),
        }
    }

    /// The base URL as an absolute URL.
    pub fn base_url(&self) -> Result<Url> {
        parse_base_url(&self.base_url)
    }

    /// The transport this configuration selects.
    pub fn transport_mode(&self) -> TransportMode {
        TransportSelector::select(self)
    }

    /// The TCP bind address in a form the socket layer accepts.
    pub fn bind_address(&self) -> String {
        normalize_bind_address(&self.http_address)
    }
}

/// Custom Debug implementation to redact the token from logs.
impl fmt::Debug for StartupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartupConfig")
            .field("force_stdio", &self.force_stdio)
            .field("http_address", &self.http_address)
            .field("unix_socket_path", &self.unix_socket_path)
            .field("base_url", &self.base_url)
            .field(
                "credential_token",
                &self.credential_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Parse a base URL. A value without a scheme (`example.com:8080`) is taken
/// as an `http` URL.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |source: ParseError| BootstrapError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    };

    match Url::parse(raw) {
        Ok(url) if url.has_host() => Ok(url),
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{}", raw)).map_err(invalid)
        }
        Err(source) => Err(invalid(source)),
    }
}

/// Expand a Go-style `:port` address to all interfaces.
pub fn normalize_bind_address(address: &str) -> String {
    if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address.to_string()
    }
}
