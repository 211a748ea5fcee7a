//! The JSON fetch seam widgets load data through.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;

/// Fetches a URL and decodes the body as JSON.
///
/// Implementations fail on transport errors and non-2xx responses. They do
/// not retry; a retry policy, if any, belongs in the implementation, never
/// in the widgets calling it.
///
/// # Example
///
/// ```ignore
/// use storefront_api::{JsonFetcher, RestClient};
///
/// let client = RestClient::builder()
///     .base_url("http://localhost:3001/")
///     .build()?;
///
/// let url = client.endpoint("api/rest/products")?;
/// let products = client.fetch_json(&url).await?;
/// ```
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` and decode the JSON body.
    async fn fetch_json(&self, url: &Url) -> Result<Value, ApiError>;
}

/// A fetcher answering from canned responses keyed by URL path.
///
/// Useful for demos and tests. Every request is recorded, query string
/// included, and unknown paths answer with HTTP 404.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    routes: HashMap<String, Result<Value, u16>>,
    requests: Mutex<Vec<Url>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `path` with `body`.
    pub fn route(mut self, path: impl Into<String>, body: Value) -> Self {
        self.routes.insert(path.into(), Ok(body));
        self
    }

    /// Answer requests for `path` with an HTTP error status.
    pub fn failing_route(mut self, path: impl Into<String>, status: u16) -> Self {
        self.routes.insert(path.into(), Err(status));
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl JsonFetcher for StaticFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value, ApiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());

        match self.routes.get(url.path()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(ApiError::http(*status, format!("{} failed", url.path()))),
            None => Err(ApiError::http(404, format!("no route for {}", url.path()))),
        }
    }
}
