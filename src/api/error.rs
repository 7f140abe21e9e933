//! API client error types.

use thiserror::Error;

/// Errors returned by the DigitalOcean API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured API endpoint is not a valid URL.
    #[error("Invalid API endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// The request could not be sent or the body could not be decoded.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// Create a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Whether the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
