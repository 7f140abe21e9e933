//! MCP Server Entry Point
//!
//! Initializes logging, then runs the bootstrap sequence and turns its outcome
//! into the process exit status.

use std::process::ExitCode;

use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use mcp_digitalocean::core::config::LoggingConfig;
use mcp_digitalocean::core::{Bootstrap, BootstrapError, FatalErrorReporter, SystemEnvironment};

#[tokio::main]
async fn main() -> ExitCode {
    let env = SystemEnvironment::load();

    // Logs go to stderr: stdout belongs to the stdio transport.
    init_logging(&LoggingConfig::from_env(&env).level);

    match Bootstrap::new(&env).run(std::env::args_os()).await {
        Ok(()) => {
            info!("Server stopped");
            ExitCode::SUCCESS
        }
        // Usage errors, --help and --version print through clap.
        Err(BootstrapError::InvalidArguments(e)) => e.exit(),
        Err(e) => FatalErrorReporter::new(&env).report(&e),
    }
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
