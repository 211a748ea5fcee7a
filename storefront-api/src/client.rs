//! HTTP client for the storefront backend

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::fetch::JsonFetcher;

/// JSON-over-HTTP client for the backend REST API.
///
/// Cheap to clone (uses `Arc` internally). Relative endpoint paths resolve
/// against the configured base URL.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use storefront_api::RestClient;
///
/// let client = RestClient::builder()
///     .base_url("http://localhost:3001/")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl RestClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> RestClientBuilder<Missing> {
        RestClientBuilder::new()
    }

    /// Returns the base URL endpoints resolve against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolves a relative endpoint path (`api/rest/products`) against the
    /// base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }
}

#[async_trait]
impl JsonFetcher for RestClient {
    async fn fetch_json(&self, url: &Url) -> Result<Value, ApiError> {
        debug!("GET {url}");

        let mut request = self.inner.http_client.get(url.clone());
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(ApiError::http(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
    }
}

impl RestClient {
    fn classify(&self, err: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(err),
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`RestClient`].
///
/// The base URL is required and enforced at compile time.
pub struct RestClientBuilder<Base> {
    base_url: Base,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl RestClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            timeout: None,
            http_client: None,
        }
    }

    /// Sets the backend base URL.
    pub fn base_url(self, url: impl Into<String>) -> RestClientBuilder<Set<String>> {
        RestClientBuilder {
            base_url: Set(url.into()),
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for RestClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> RestClientBuilder<B> {
    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a preconfigured `reqwest` client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl RestClientBuilder<Set<String>> {
    /// Builds the client. Fails if the base URL does not parse.
    pub fn build(self) -> Result<RestClient, ApiError> {
        let Set(raw) = self.base_url;
        let mut base_url = Url::parse(&raw)?;

        // Url::join drops the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(RestClient {
            inner: Arc::new(RestClientInner {
                base_url,
                http_client: self.http_client.unwrap_or_default(),
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_resolution() {
        let client = RestClient::builder()
            .base_url("http://localhost:3001/backend")
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:3001/backend/");
        assert_eq!(
            client.endpoint("api/rest/products").unwrap().as_str(),
            "http://localhost:3001/backend/api/rest/products"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = RestClient::builder().base_url("not a url").build().err();
        assert!(matches!(err, Some(ApiError::InvalidUrl(_))));
    }
}
