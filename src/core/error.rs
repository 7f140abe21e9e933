//! Error types and handling for the server bootstrap.
//!
//! Every variant of [`BootstrapError`] is terminal: it is reported once by the
//! fatal error reporter and the process exits with a non-zero status.

use std::fmt;

use thiserror::Error;

use super::transport::TransportError;
use crate::api::ApiError;

/// A specialized Result type for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// The bootstrap stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Command-line and environment resolution.
    Config,
    /// Credential validation.
    Credentials,
    /// API client construction.
    Client,
    /// Listener binding.
    Bind,
    /// The blocking serve call.
    Serve,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Credentials => "credentials",
            Self::Client => "client",
            Self::Bind => "bind",
            Self::Serve => "serve",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the bootstrap sequence.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Command-line arguments could not be parsed (also covers `--help`).
    #[error(transparent)]
    InvalidArguments(#[from] clap::Error),

    /// The `--base-url` value is not an absolute URL.
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The required API token is unset or empty.
    #[error("{variable} environment variable is not set")]
    MissingCredential { variable: &'static str },

    /// The API client could not be built.
    #[error("Failed to initialise API client: {0}")]
    ClientInit(#[source] ApiError),

    /// The socket, path or address could not be bound.
    #[error("Failed to listen on {target}: {source}")]
    ListenerBindFailure {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The serve call ended with an error.
    #[error("Server error: {0}")]
    ServeFailure(String),
}

impl BootstrapError {
    /// Create a missing credential error.
    pub fn missing_credential(variable: &'static str) -> Self {
        Self::MissingCredential { variable }
    }

    /// Create a listener bind error.
    pub fn bind(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::ListenerBindFailure {
            target: target.into(),
            source,
        }
    }

    /// Create a serve error.
    pub fn serve(msg: impl Into<String>) -> Self {
        Self::ServeFailure(msg.into())
    }

    /// The stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            Self::InvalidArguments(_) | Self::InvalidBaseUrl { .. } => Stage::Config,
            Self::MissingCredential { .. } => Stage::Credentials,
            Self::ClientInit(_) => Stage::Client,
            Self::ListenerBindFailure { .. } => Stage::Bind,
            Self::ServeFailure(_) => Stage::Serve,
        }
    }
}

impl From<TransportError> for BootstrapError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Bind { address, source } => Self::bind(address, source),
            other => Self::serve(other.to_string()),
        }
    }
}
