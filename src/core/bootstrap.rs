//! Process bootstrap.
//!
//! Resolves the startup configuration, validates credentials, builds the API
//! client and the MCP server, then hands the server to the selected transport.
//! Each step either succeeds or returns a terminal [`BootstrapError`]; nothing
//! is retried.

use std::ffi::OsString;
use std::sync::Arc;

use tracing::{debug, info};

use super::config::Config;
use super::credentials::CredentialGuard;
use super::env::ProcessEnvironment;
use super::error::{BootstrapError, Result};
use super::server::McpServer;
use super::startup::StartupConfig;
use super::transport::{TransportConfig, TransportService};
use crate::api::DigitalOceanClient;

/// Drives the bootstrap sequence against an injected environment.
pub struct Bootstrap<'a> {
    env: &'a dyn ProcessEnvironment,
    guard: CredentialGuard,
}

impl<'a> Bootstrap<'a> {
    pub fn new(env: &'a dyn ProcessEnvironment) -> Self {
        Self {
            env,
            guard: CredentialGuard::default(),
        }
    }

    /// Run the server until the transport ends.
    ///
    /// `args` is the full argument list, program name included.
    pub async fn run<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let startup = StartupConfig::resolve(args, self.env)?;
        debug!(?startup, "Resolved startup configuration");

        let config = Config::from_env(self.env);
        info!("Starting {} v{}", config.server.name, config.server.version);

        let token = self.guard.check(&startup)?;

        let client =
            DigitalOceanClient::new(token, &config.api).map_err(BootstrapError::ClientInit)?;
        debug!(endpoint = %client.endpoint(), "API client ready");

        let server = McpServer::new(config.server.clone(), Arc::new(client));
        info!("Server initialized");

        let transport = TransportConfig::from_startup(&startup, &config.http)?;
        TransportService::new(transport).run(server).await?;

        info!("Server shutting down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MapEnvironment;
    use crate::core::error::Stage;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_test::assert_err;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("mcp-digitalocean")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    async fn run(env: &MapEnvironment, args: &[&str]) -> BootstrapError {
        let outcome = timeout(Duration::from_secs(5), Bootstrap::new(env).run(argv(args)))
            .await
            .expect("bootstrap should fail fast");
        assert_err!(outcome)
    }

    #[tokio::test]
    async fn test_missing_token_fails_in_every_mode() {
        let env = MapEnvironment::new();
        for args in [
            &[][..],
            &["--stdio"][..],
            &["--http", ":9090"][..],
            &["--unix", "/tmp/never-bound.sock"][..],
        ] {
            let err = run(&env, args).await;
            assert!(
                matches!(err, BootstrapError::MissingCredential { variable: "DO_TOKEN" }),
                "args {:?} gave {:?}",
                args,
                err
            );
            assert_eq!(err.stage(), Stage::Credentials);
        }
    }

    #[tokio::test]
    async fn test_empty_token_is_missing() {
        let env = MapEnvironment::new().with("DO_TOKEN", "");
        let err = run(&env, &["--http", ":9090"]).await;
        assert!(matches!(err, BootstrapError::MissingCredential { .. }));
    }

    #[tokio::test]
    async fn test_missing_token_never_touches_socket_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp.sock");
        let env = MapEnvironment::new();

        let err = run(&env, &["--unix", path.to_str().unwrap()]).await;
        assert!(matches!(err, BootstrapError::MissingCredential { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_config_error() {
        let env = MapEnvironment::new().with("DO_TOKEN", "t");
        let err = run(&env, &["--base-url", "not a url"]).await;
        assert!(matches!(err, BootstrapError::InvalidBaseUrl { .. }));
        assert_eq!(err.stage(), Stage::Config);
    }

    #[tokio::test]
    async fn test_missing_token_reported_before_invalid_base_url() {
        let env = MapEnvironment::new();
        let err = run(&env, &["--base-url", "not a url"]).await;
        assert!(matches!(err, BootstrapError::MissingCredential { .. }));
    }

    #[tokio::test]
    async fn test_invalid_api_endpoint_is_client_error() {
        let env = MapEnvironment::new()
            .with("DO_TOKEN", "t")
            .with("DO_API_URL", "::not-a-url::");
        let err = run(&env, &["--http", "127.0.0.1:0"]).await;
        assert!(matches!(err, BootstrapError::ClientInit(_)));
        assert_eq!(err.stage(), Stage::Client);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stale_socket_file_is_bind_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stale.sock");
        std::fs::write(&path, b"stale").unwrap();
        let env = MapEnvironment::new().with("DO_TOKEN", "t");

        let err = run(&env, &["--unix", path.to_str().unwrap()]).await;
        assert!(matches!(err, BootstrapError::ListenerBindFailure { .. }));
        assert_eq!(err.stage(), Stage::Bind);
        assert_eq!(std::fs::read(&path).unwrap(), b"stale");
    }

    #[tokio::test]
    async fn test_port_in_use_is_bind_failure() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = taken.local_addr().unwrap().to_string();
        let env = MapEnvironment::new().with("DO_TOKEN", "t");

        let err = run(&env, &["--http", &address]).await;
        match err {
            BootstrapError::ListenerBindFailure { target, .. } => assert_eq!(target, address),
            other => panic!("expected bind failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_flag_is_invalid_arguments() {
        let env = MapEnvironment::new().with("DO_TOKEN", "t");
        let err = run(&env, &["--bogus"]).await;
        assert!(matches!(err, BootstrapError::InvalidArguments(_)));
    }
}
