//! Tool-specific error types.

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The DigitalOcean API call failed.
    #[error("DigitalOcean API error: {0}")]
    Api(#[from] ApiError),

    /// The API answered with a body the tool could not interpret.
    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "unexpected response" error.
    pub fn unexpected_response(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }
}
