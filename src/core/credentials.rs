//! API credential validation.
//!
//! The guard runs before any server or listener is constructed, whatever the
//! transport: the handlers need the token even when the transport does not.

use std::fmt;

use tracing::debug;

use super::error::{BootstrapError, Result};
use super::startup::StartupConfig;

/// Environment variable carrying the DigitalOcean API token.
pub const CREDENTIAL_VAR: &str = "DO_TOKEN";

/// A validated, non-empty API token.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// The raw token, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Custom Debug implementation to redact the token from logs.
impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken([REDACTED])")
    }
}

/// Checks that the API token is present.
#[derive(Debug, Clone, Copy)]
pub struct CredentialGuard {
    variable: &'static str,
}

impl Default for CredentialGuard {
    fn default() -> Self {
        Self::new(CREDENTIAL_VAR)
    }
}

impl CredentialGuard {
    pub fn new(variable: &'static str) -> Self {
        Self { variable }
    }

    /// Validate a raw token value. Unset and empty are both rejected.
    pub fn require(&self, token: Option<&str>) -> Result<ApiToken> {
        match token {
            Some(token) if !token.is_empty() => {
                debug!("{} present", self.variable);
                Ok(ApiToken(token.to_string()))
            }
            _ => Err(BootstrapError::missing_credential(self.variable)),
        }
    }

    /// Validate the token captured in the startup configuration.
    pub fn check(&self, config: &StartupConfig) -> Result<ApiToken> {
        self.require(config.credential_token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_token_is_accepted() {
        let token = CredentialGuard::default().require(Some("abc")).unwrap();
        assert_eq!(token.expose(), "abc");
    }

    #[test]
    fn test_unset_token_is_rejected() {
        let err = CredentialGuard::default().require(None).unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::MissingCredential { variable: "DO_TOKEN" }
        ));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = CredentialGuard::default().require(Some("")).unwrap_err();
        assert!(matches!(err, BootstrapError::MissingCredential { .. }));
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let token = CredentialGuard::default()
            .require(Some("super_secret_token"))
            .unwrap();
        let debug_str = format!("{:?}", token);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }
}
