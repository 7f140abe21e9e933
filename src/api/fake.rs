//! In-memory [`CloudApi`] for handler tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ApiError, CloudApi};

/// Answers GET requests from a fixed path → body table and records every call.
#[derive(Debug, Default)]
pub struct StaticApi {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl StaticApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), body);
        self
    }

    /// Paths and queries requested so far.
    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CloudApi for StaticApi {
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push((
            path.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));
        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| ApiError::status(404, "The resource you were accessing could not be found."))
    }
}
