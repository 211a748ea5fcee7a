//! Path routing and the page host.

use domtree::{Document, Element, Event, Viewport, to_html};
use log::{error, info};
use storefront_widgets::{Error, EventResult};

use crate::error::RouteError;
use crate::pages::{DashboardPage, Page, PageContext, ProductsPage};

/// Class the content host carries while a page loads.
pub const LOADING_CLASS: &str = "is-loading";
pub const CONTENT_ID: &str = "content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Products,
}

impl Route {
    /// Match a path like `/products` or `dashboard/`.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        match path.trim_matches('/') {
            "" | "dashboard" => Ok(Self::Dashboard),
            "products" => Ok(Self::Products),
            other => Err(RouteError::NotFound(other.to_string())),
        }
    }

    pub fn build(self, ctx: &PageContext) -> Result<Box<dyn Page>, RouteError> {
        Ok(match self {
            Self::Dashboard => Box::new(DashboardPage::new(ctx)?),
            Self::Products => Box::new(ProductsPage::new(ctx)?),
        })
    }
}

/// The `main` element pages render into.
pub fn shell(content: Element, loading: bool) -> Element {
    let mut host = Element::div().id(CONTENT_ID).class("content").child(content);
    host.toggle_class(LOADING_CLASS, loading);
    Element::new("main").class("main").child(host)
}

/// Hosts one page at a time in a document.
pub struct Router {
    ctx: PageContext,
    doc: Document,
    page: Option<Box<dyn Page>>,
    main: Element,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("ctx", &self.ctx)
            .field("page", &self.page.as_ref().map(|page| page.name()))
            .finish_non_exhaustive()
    }
}

impl Router {
    pub fn new(ctx: PageContext, viewport: Viewport) -> Self {
        Self {
            ctx,
            doc: Document::new(viewport),
            page: None,
            main: shell(Element::div(), false),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// For hosts that lay the page out after rendering.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn page(&self) -> Option<&dyn Page> {
        self.page.as_deref()
    }

    pub fn main(&self) -> &Element {
        &self.main
    }

    pub fn html(&self) -> String {
        to_html(&self.main)
    }

    /// Replace the current page with the one at `path` and load it.
    ///
    /// The host carries [`LOADING_CLASS`] until the load settles. A page
    /// that fails to load is torn down again.
    pub async fn render_page(&mut self, path: &str) -> Result<&Element, RouteError> {
        let route = Route::parse(path)?;
        let page = route.build(&self.ctx)?;
        self.unmount();

        info!("routing `{path}` to {}", page.name());
        self.main = shell(page.render(&mut self.doc), true);

        if let Err(e) = page.load().await {
            error!("{}: load failed: {e}", page.name());
            page.destroy(&mut self.doc);
            self.main = shell(Element::div(), false);
            return Err(e.into());
        }

        self.main = shell(page.render(&mut self.doc), false);
        self.page = Some(page);
        Ok(&self.main)
    }

    /// Deliver a document event to the current page and re-render it.
    pub async fn dispatch(&mut self, event: &Event) -> Result<EventResult, Error> {
        let Some(page) = &self.page else {
            return Ok(EventResult::Ignored);
        };

        let result = page.handle_event(&mut self.doc, event).await?;
        if result.is_handled() {
            self.main = shell(page.render(&mut self.doc), false);
        }
        Ok(result)
    }

    /// Tear down the current page. Returns how many listeners it released.
    pub fn unmount(&mut self) -> usize {
        let Some(page) = self.page.take() else {
            return 0;
        };
        let released = page.destroy(&mut self.doc);
        info!("{}: unmounted, {released} listeners released", page.name());
        self.main = shell(Element::div(), false);
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("").unwrap(), Route::Dashboard);
        assert_eq!(Route::parse("/").unwrap(), Route::Dashboard);
        assert_eq!(Route::parse("/dashboard/").unwrap(), Route::Dashboard);
        assert_eq!(Route::parse("products").unwrap(), Route::Products);
        assert!(matches!(
            Route::parse("/sales"),
            Err(RouteError::NotFound(path)) if path == "sales"
        ));
    }

    #[test]
    fn test_shell_loading_class() {
        let loading = shell(Element::div(), true);
        let host = domtree::find_element(&loading, CONTENT_ID).unwrap();
        assert!(host.has_class(LOADING_CLASS));

        let done = shell(Element::div(), false);
        let host = domtree::find_element(&done, CONTENT_ID).unwrap();
        assert!(!host.has_class(LOADING_CLASS));
    }
}
