//! Fatal error reporting.
//!
//! The single place where a bootstrap failure turns into a log line and a
//! process exit status.

use std::fmt;
use std::process::ExitCode;

use tracing::error;

use super::credentials::CREDENTIAL_VAR;
use super::env::ProcessEnvironment;
use super::error::BootstrapError;

/// Exit status for every fatal bootstrap error.
pub const FAILURE_EXIT_CODE: u8 = 1;

const REDACTED: &str = "[REDACTED]";

/// Logs terminal bootstrap errors and maps them to an exit status.
///
/// The API token is read from the environment at construction and scrubbed
/// from every reported message.
#[derive(Clone, Default)]
pub struct FatalErrorReporter {
    secret: Option<String>,
}

impl fmt::Debug for FatalErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FatalErrorReporter")
            .field("secret", &self.secret.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl FatalErrorReporter {
    pub fn new(env: &dyn ProcessEnvironment) -> Self {
        Self {
            secret: env.non_empty_var(CREDENTIAL_VAR),
        }
    }

    /// Log the error at error level and return the exit status.
    ///
    /// Returning the status instead of exiting lets callers unwind first, so
    /// drop guards (such as the UNIX socket file cleanup) still run.
    pub fn report(&self, err: &BootstrapError) -> ExitCode {
        let message = self.redact(err.to_string());
        error!(stage = %err.stage(), error = %message, "{}", headline(err));
        ExitCode::from(FAILURE_EXIT_CODE)
    }

    fn redact(&self, message: String) -> String {
        match &self.secret {
            Some(secret) if message.contains(secret.as_str()) => {
                message.replace(secret.as_str(), REDACTED)
            }
            _ => message,
        }
    }
}

fn headline(err: &BootstrapError) -> &'static str {
    match err {
        BootstrapError::InvalidArguments(_) => "Invalid command-line arguments",
        BootstrapError::InvalidBaseUrl { .. } => "Invalid base URL",
        BootstrapError::MissingCredential { .. } => "Missing API credentials",
        BootstrapError::ClientInit(_) => "Failed to create API client",
        BootstrapError::ListenerBindFailure { .. } => "Failed to start listener",
        BootstrapError::ServeFailure(_) => "Server error",
    }
}
