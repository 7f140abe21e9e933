//! UNIX domain socket transport.
//!
//! Serves the streamable-HTTP router on a socket file. The path is bound as
//! given: an existing file or stale socket makes the bind fail instead of
//! being unlinked.

use std::io;
use std::path::{Path, PathBuf};

use tokio::net::UnixListener;
use tracing::{debug, info, warn};

use super::config::UnixSocketConfig;
use super::http::build_router;
use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Removes the socket file when dropped.
///
/// Only created after a successful bind, so it never deletes a file this
/// process did not create.
#[derive(Debug)]
pub struct SocketFileGuard {
    path: PathBuf,
}

impl SocketFileGuard {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SocketFileGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed UNIX socket file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove UNIX socket file"
            ),
        }
    }
}

/// UNIX socket transport handler.
pub struct UnixSocketTransport {
    config: UnixSocketConfig,
}

impl UnixSocketTransport {
    /// Create a new UNIX socket transport with the given config.
    pub fn new(config: UnixSocketConfig) -> Self {
        Self { config }
    }

    /// Get the socket path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Bind the socket. The returned guard owns the socket file.
    pub fn bind(&self) -> TransportResult<(UnixListener, SocketFileGuard)> {
        let path = self.path();
        let listener = UnixListener::bind(path)
            .map_err(|e| TransportError::bind(path.display().to_string(), e))?;
        Ok((listener, SocketFileGuard::new(path)))
    }

    /// Run the UNIX socket transport. Returns only when the serve loop fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let (listener, _socket_file) = self.bind()?;
        info!(path = %self.path().display(), "Listening on UNIX socket");

        let app = build_router(server, &self.config.http);
        info!("  → MCP:    {}", self.config.http.endpoint_url());

        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::StaticApi;
    use crate::core::config::{HttpOptionsConfig, ServerConfig};
    use crate::core::test_support::LogCapture;
    use crate::core::transport::StreamableHttpConfig;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use url::Url;

    fn transport(path: &Path) -> UnixSocketTransport {
        UnixSocketTransport::new(UnixSocketConfig {
            path: path.to_path_buf(),
            http: StreamableHttpConfig::new(
                Url::parse("http://localhost:8080").unwrap(),
                &HttpOptionsConfig::default(),
            ),
        })
    }

    fn test_server() -> McpServer {
        McpServer::new(ServerConfig::default(), Arc::new(StaticApi::new()))
    }

    #[tokio::test]
    async fn test_stale_regular_file_fails_to_bind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stale.sock");
        std::fs::write(&path, b"not a socket").unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), transport(&path).run(test_server()))
            .await
            .expect("bind failure must not hang");

        assert!(matches!(result, Err(TransportError::Bind { .. })));
        // The pre-existing file is left alone.
        assert_eq!(std::fs::read(&path).unwrap(), b"not a socket");
    }

    #[tokio::test]
    async fn test_missing_parent_directory_fails_to_bind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("do.sock");

        let err = transport(&path).bind().unwrap_err();
        match err {
            TransportError::Bind { address, .. } => {
                assert_eq!(address, path.display().to_string())
            }
            other => panic!("expected bind error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_guard_removes_socket_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("do.sock");

        let (listener, guard) = transport(&path).bind().unwrap();
        assert!(path.exists());
        assert_eq!(guard.path(), path.as_path());

        drop(listener);
        drop(guard);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_run_logs_socket_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("do.sock");
        let logs = LogCapture::new();

        {
            let _default = tracing::subscriber::set_default(logs.subscriber());
            let outcome = tokio::time::timeout(
                Duration::from_millis(200),
                transport(&path).run(test_server()),
            )
            .await;
            assert!(outcome.is_err(), "serving should block until cancelled");
        }

        let output = logs.output();
        assert!(output.contains("Listening on UNIX socket"));
        assert!(output.contains(&path.display().to_string()));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_serves_health_over_socket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("do.sock");

        let handle = tokio::spawn(transport(&path).run(test_server()));

        let mut stream = None;
        for _ in 0..50 {
            if let Ok(s) = tokio::net::UnixStream::connect(&path).await {
                stream = Some(s);
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let mut stream = stream.expect("socket should accept connections");

        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("healthy"));

        handle.abort();
        let _ = handle.await;
        assert!(!path.exists());
    }
}
