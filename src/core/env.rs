//! Process environment access.
//!
//! Everything that reads environment variables (startup resolution, the
//! credential guard, ambient configuration) goes through [`ProcessEnvironment`]
//! so it can be exercised with an injected environment in tests.

use std::collections::HashMap;

/// Read-only view of the process environment.
pub trait ProcessEnvironment: Send + Sync {
    /// Look up a variable. Unset and non-UTF-8 values are both `None`.
    fn var(&self, name: &str) -> Option<String>;

    /// Look up a variable and treat an empty value as unset.
    fn non_empty_var(&self, name: &str) -> Option<String> {
        self.var(name).filter(|value| !value.is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    /// Load a `.env` file from the working directory (if any) and return the
    /// process environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self
    }
}

impl ProcessEnvironment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, independent of the real environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ProcessEnvironment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
