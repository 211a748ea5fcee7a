//! Admin pages.
//!
//! A page composes widgets, lays them out and routes document events to
//! them. Widgets only see events they registered a listener for, and a
//! page's `destroy` releases every widget's registrations.

mod columns;
mod dashboard;
mod products;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use domtree::{Document, Element, Event};
use storefront_api::JsonFetcher;
use storefront_widgets::{EventResult, Error};
use url::Url;

use crate::config::AppConfig;
use crate::error::RouteError;

pub use dashboard::DashboardPage;
pub use products::ProductsPage;

/// What every page is built from.
#[derive(Clone)]
pub struct PageContext {
    pub fetcher: Arc<dyn JsonFetcher>,
    pub backend_url: Url,
    pub locales: Vec<String>,
    pub page_size: usize,
    /// Date the default ranges end on.
    pub today: NaiveDate,
}

impl std::fmt::Debug for PageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageContext")
            .field("backend_url", &self.backend_url.as_str())
            .field("locales", &self.locales)
            .field("page_size", &self.page_size)
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

impl PageContext {
    pub fn new(config: &AppConfig, fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            fetcher,
            backend_url: config.backend_url.clone(),
            locales: config.locales.clone(),
            page_size: config.page_size,
            today: Utc::now().date_naive(),
        }
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Absolute URL of an API path.
    pub fn endpoint(&self, path: &str) -> Result<Url, RouteError> {
        Ok(self
            .backend_url
            .join(path)
            .map_err(storefront_api::ApiError::from)?)
    }
}

#[async_trait]
pub trait Page: Send + Sync {
    /// Route name.
    fn name(&self) -> &'static str;

    /// Mount the page's widgets into `doc` and return the page markup.
    /// Repeated calls re-render without registering anything twice.
    fn render(&self, doc: &mut Document) -> Element;

    /// Fetch the initial data for every widget.
    async fn load(&self) -> Result<(), Error>;

    /// Route a document event to the page's widgets.
    async fn handle_event(&self, doc: &mut Document, event: &Event) -> Result<EventResult, Error>;

    /// Release every listener the page's widgets registered.
    fn destroy(&self, doc: &mut Document) -> usize;
}

/// The first handled result of several.
fn first_handled(results: impl IntoIterator<Item = EventResult>) -> EventResult {
    results
        .into_iter()
        .find(EventResult::is_handled)
        .unwrap_or(EventResult::Ignored)
}
