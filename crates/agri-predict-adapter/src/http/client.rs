/*
[INPUT]:  HTTP configuration (base URL, connect timeout)
[OUTPUT]: Configured reqwest client ready for backend calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{AgriError, Result, TransportError};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP client configuration.
///
/// No request timeout is set: a prediction runs until the backend answers
/// or the connection fails.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// HTTP client for the prediction and recommendation backends
#[derive(Debug, Clone)]
pub struct AgriClient {
    http_client: Client,
    base_url: Url,
}

impl AgriClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|err| AgriError::Config(format!("build http client: {err}")))?;

        // Endpoints are joined relative to the base, so keep a trailing slash
        // to preserve any path prefix.
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|err| AgriError::Config(format!("invalid base url {base:?}: {err}")))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint
    fn url(&self, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
        self.base_url.join(endpoint.trim_start_matches('/'))
    }

    /// Build request builder for an endpoint
    pub(crate) fn request(
        &self,
        method: Method,
        endpoint: &str,
    ) -> std::result::Result<RequestBuilder, url::ParseError> {
        let url = self.url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode a JSON body, mapping non-2xx to `Api`
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> std::result::Result<T, TransportError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TransportError::api_error(status, body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_prefix_preserved() {
        let client = AgriClient::with_config(ClientConfig::with_base_url("http://farm.local/api"))
            .expect("client init");
        let url = client.url("/predict/yield/").expect("join");
        assert_eq!(url.as_str(), "http://farm.local/api/predict/yield/");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = AgriClient::with_config(ClientConfig::with_base_url("not a url"))
            .expect_err("should reject");
        assert!(matches!(err, AgriError::Config(_)));
    }
}
