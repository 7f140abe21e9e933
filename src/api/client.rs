//! Token-authenticated DigitalOcean API client.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::ApiError;
use crate::core::config::ApiConfig;
use crate::core::credentials::ApiToken;

/// Read access to the cloud provider API.
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// GET `path` (e.g. `/v2/account`) with the given query and return the
    /// decoded JSON body.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError>;
}

/// DigitalOcean API v2 client.
#[derive(Clone)]
pub struct DigitalOceanClient {
    http: reqwest::Client,
    endpoint: Url,
    token: ApiToken,
}

impl std::fmt::Debug for DigitalOceanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token)
            .finish()
    }
}

impl DigitalOceanClient {
    /// Build a client for the configured endpoint.
    pub fn new(token: ApiToken, config: &ApiConfig) -> Result<Self, ApiError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|source| ApiError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    /// The API endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Absolute URL for an API path, keeping any path prefix of the endpoint.
    pub fn url_for(&self, path: &str) -> Url {
        let mut url = self.endpoint.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }
}

#[async_trait]
impl CloudApi for DigitalOceanClient {
    #[instrument(skip(self, query), fields(endpoint = %self.endpoint))]
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = self.url_for(path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.expose())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Error bodies look like {"id": "not_found", "message": "..."}.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        Err(ApiError::status(status.as_u16(), message))
    }
}
