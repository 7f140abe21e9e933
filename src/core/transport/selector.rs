//! Transport selection.
//!
//! The selection is an ordered rule table evaluated top to bottom; the first
//! rule that applies wins and HTTP is the fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::core::startup::StartupConfig;

/// The transport a process serves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Stdio,
    UnixSocket,
    Http,
}

impl TransportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::UnixSocket => "unix_socket",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the precedence table.
struct Rule {
    name: &'static str,
    mode: TransportMode,
    applies: fn(&StartupConfig) -> bool,
}

fn stdio_forced(config: &StartupConfig) -> bool {
    config.force_stdio
}

fn unix_socket_given(config: &StartupConfig) -> bool {
    config
        .unix_socket_path
        .as_ref()
        .is_some_and(|path| !path.as_os_str().is_empty())
}

/// Precedence, highest first. Explicit stdio is never overridden.
const RULES: &[Rule] = &[
    Rule {
        name: "stdio forced",
        mode: TransportMode::Stdio,
        applies: stdio_forced,
    },
    Rule {
        name: "unix socket path given",
        mode: TransportMode::UnixSocket,
        applies: unix_socket_given,
    },
];

/// Transport used when no rule applies.
const FALLBACK: TransportMode = TransportMode::Http;

/// Chooses the single transport for a process.
pub struct TransportSelector;

impl TransportSelector {
    /// Select the transport for the given configuration.
    pub fn select(config: &StartupConfig) -> TransportMode {
        match RULES.iter().find(|rule| (rule.applies)(config)) {
            Some(rule) => {
                debug!(rule = rule.name, mode = %rule.mode, "Transport rule matched");
                rule.mode
            }
            None => {
                debug!(mode = %FALLBACK, "No transport rule matched, using fallback");
                FALLBACK
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(force_stdio: bool, unix: Option<&str>, http: &str) -> StartupConfig {
        StartupConfig {
            force_stdio,
            http_address: http.to_string(),
            unix_socket_path: unix.map(PathBuf::from),
            base_url: "http://localhost:8080".to_string(),
            credential_token: Some("abc".to_string()),
        }
    }

    #[test]
    fn test_stdio_wins_over_everything() {
        let cfg = config(true, Some("/tmp/test.sock"), "127.0.0.1:9090");
        assert_eq!(TransportSelector::select(&cfg), TransportMode::Stdio);
    }

    #[test]
    fn test_unix_wins_over_http() {
        let cfg = config(false, Some("/tmp/test.sock"), "127.0.0.1:9090");
        assert_eq!(TransportSelector::select(&cfg), TransportMode::UnixSocket);
    }

    #[test]
    fn test_http_is_fallback() {
        let cfg = config(false, None, ":8080");
        assert_eq!(TransportSelector::select(&cfg), TransportMode::Http);
    }

    #[test]
    fn test_empty_unix_path_does_not_select_unix() {
        let cfg = config(false, Some(""), ":8080");
        assert_eq!(TransportSelector::select(&cfg), TransportMode::Http);
    }

    #[test]
    fn test_every_flag_combination_selects_exactly_one_mode() {
        for force_stdio in [false, true] {
            for unix in [None, Some("/tmp/a.sock")] {
                for http in [":8080", "127.0.0.1:9090"] {
                    let cfg = config(force_stdio, unix, http);
                    let expected = if force_stdio {
                        TransportMode::Stdio
                    } else if unix.is_some() {
                        TransportMode::UnixSocket
                    } else {
                        TransportMode::Http
                    };
                    assert_eq!(TransportSelector::select(&cfg), expected);
                }
            }
        }
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(TransportMode::UnixSocket.to_string(), "unix_socket");
        assert_eq!(
            serde_json::to_string(&TransportMode::Http).unwrap(),
            "\"http\""
        );
    }
}
