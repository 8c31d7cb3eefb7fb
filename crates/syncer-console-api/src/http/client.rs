/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{Result, SyncerError};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default base URL for a locally running syncer backend
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the syncer backend API.
///
/// Carries a cookie store: the backend scopes the admin session to a cookie,
/// so every request is sent with credentials included.
#[derive(Debug)]
pub struct SyncerClient {
    http_client: Client,
    base_url: Url,
}

impl SyncerClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client pointed at a specific backend
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_config_and_base_url(ClientConfig::default(), base_url)
    }

    /// Create a new client with custom configuration and backend URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an API endpoint
    fn api_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// Build request builder for an API endpoint
    pub(crate) fn api_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.api_url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and deserialize the JSON response body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = %status, "syncer backend response");
        serde_json::from_str(&body).map_err(SyncerError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_client_with_base_url() {
        let client = SyncerClient::with_base_url("http://10.0.0.5:8080").expect("client init");
        assert_eq!(client.base_url.as_str(), "http://10.0.0.5:8080/");
    }

    #[test]
    fn test_client_rejects_bad_url() {
        assert!(SyncerClient::with_base_url("not a url").is_err());
    }
}
