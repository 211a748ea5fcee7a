//! Product list: price, title and status filters over a remote table.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use domtree::{Document, Element, Event, EventKind, ListenerId};
use log::debug;
use storefront_api::query::{FilterUpdate, PriceRange};
use storefront_widgets::{
    DoubleSlider, Error, EventResult, LocaleCollator, SliderConfig, SortableTable, TableConfig,
    Throttle, WidgetEvent,
};
use url::Url;

use super::columns::product_columns;
use super::{Page, PageContext, first_handled};
use crate::error::RouteError;

const PAGE_ID: &str = "products";
const TITLE_INPUT_ID: &str = "filter-name";
const STATUS_SELECT_ID: &str = "filter-status";

/// Minimum gap between scroll events forwarded to the table.
const SCROLL_COOLDOWN: Duration = Duration::from_millis(100);

pub struct ProductsPage {
    slider: DoubleSlider,
    table: SortableTable,
    products_url: Url,
    fetcher: Arc<dyn storefront_api::JsonFetcher>,
    scroll: Mutex<Throttle>,
    input_listener: Mutex<Option<ListenerId>>,
}

impl std::fmt::Debug for ProductsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductsPage")
            .field("slider", &self.slider)
            .field("table", &self.table)
            .field("products_url", &self.products_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ProductsPage {
    pub fn new(ctx: &PageContext) -> Result<Self, RouteError> {
        let products_url = ctx.endpoint("api/rest/products")?;

        let slider = DoubleSlider::new(SliderConfig::default())?.with_id("products-price");
        let config = TableConfig::new(products_url.clone())
            .page_size(ctx.page_size)
            .row_link("/products/");
        let table = SortableTable::new(product_columns(), config, ctx.fetcher.clone())?
            .with_collator(Arc::new(LocaleCollator::new(&ctx.locales)))
            .with_id("products-list");

        Ok(Self {
            slider,
            table,
            products_url,
            fetcher: ctx.fetcher.clone(),
            scroll: Mutex::new(Throttle::new(SCROLL_COOLDOWN)),
            input_listener: Mutex::new(None),
        })
    }

    pub fn slider(&self) -> &DoubleSlider {
        &self.slider
    }

    pub fn table(&self) -> &SortableTable {
        &self.table
    }

    fn input_listener(&self) -> MutexGuard<'_, Option<ListenerId>> {
        self.input_listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn filter_form(&self) -> Element {
        let option = |value: &str, label: &str| {
            Element::new("option")
                .attr("value", value)
                .child(Element::text(label))
        };

        Element::new("form")
            .class("form-inline")
            .data("element", "filterForm")
            .child(
                Element::div()
                    .class("form-group")
                    .child(
                        Element::new("label")
                            .class("form-label")
                            .child(Element::text("Filter by name")),
                    )
                    .child(
                        Element::new("input")
                            .id(TITLE_INPUT_ID)
                            .class("form-control")
                            .attr("type", "text")
                            .attr("placeholder", "Product name")
                            .data("element", "filterName"),
                    ),
            )
            .child(
                Element::div()
                    .class("form-group")
                    .data("element", "sliderContainer")
                    .child(Element::new("label").class("form-label").child(Element::text("Price")))
                    .child(self.slider.element()),
            )
            .child(
                Element::div()
                    .class("form-group")
                    .child(
                        Element::new("label")
                            .class("form-label")
                            .child(Element::text("Status")),
                    )
                    .child(
                        Element::new("select")
                            .id(STATUS_SELECT_ID)
                            .class("form-control")
                            .data("element", "filterStatus")
                            .child(option("", "Any"))
                            .child(option("1", "Active"))
                            .child(option("0", "Inactive")),
                    ),
            )
    }

    /// Apply a form control change to the table filters.
    async fn on_input(&self, target: &str, value: &str) -> Result<EventResult, Error> {
        let update = match target {
            TITLE_INPUT_ID => FilterUpdate::new().title(value),
            STATUS_SELECT_ID => FilterUpdate::new().status(value),
            _ => return Ok(EventResult::Ignored),
        };

        debug!("{PAGE_ID}: {target} = {value:?}");
        self.table.set_filters(update).await?;
        Ok(EventResult::Consumed)
    }
}

#[async_trait]
impl Page for ProductsPage {
    fn name(&self) -> &'static str {
        PAGE_ID
    }

    fn render(&self, doc: &mut Document) -> Element {
        {
            let mut listener = self.input_listener();
            if listener.is_none() {
                *listener = Some(doc.add_listener(EventKind::Input, PAGE_ID));
            }
        }

        // Mount the slider's listener; the form embeds its markup.
        self.slider.render(doc);

        Element::div()
            .id(PAGE_ID)
            .class("products-list")
            .child(
                Element::div()
                    .class("content__top-panel")
                    .child(Element::new("h1").class("page-title").child(Element::text("Products")))
                    .child(
                        Element::anchor("/products/add")
                            .class("button-primary")
                            .child(Element::text("Add product")),
                    ),
            )
            .child(
                Element::div()
                    .class("content-box content-box_small")
                    .child(self.filter_form()),
            )
            .child(
                Element::div()
                    .data("element", "productsContainer")
                    .class("products-list__container")
                    .child(self.table.render(doc)),
            )
    }

    async fn load(&self) -> Result<(), Error> {
        let (max, table) = tokio::join!(
            self.slider
                .sync_max_with(self.fetcher.as_ref(), &self.products_url),
            self.table.reload(),
        );
        if let Some(max) = max? {
            debug!("{PAGE_ID}: price slider max {max}");
        }
        table?;
        Ok(())
    }

    async fn handle_event(&self, doc: &mut Document, event: &Event) -> Result<EventResult, Error> {
        match event {
            Event::Input { target, value } if doc.is_listening(PAGE_ID, EventKind::Input) => {
                return self.on_input(target, value).await;
            }
            Event::Scroll => {
                let ready = self
                    .scroll
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .ready(Instant::now());
                if !ready {
                    return Ok(EventResult::Ignored);
                }
            }
            _ => {}
        }

        let slid = self.slider.handle_event(doc, event);
        if let Some(WidgetEvent::RangeSelect { from, to }) = slid.emitted() {
            self.table
                .set_filters(FilterUpdate::new().price_range(PriceRange::new(from, to)))
                .await?;
        }

        let table = self.table.handle_event(doc, event).await?;
        Ok(first_handled([slid, table]))
    }

    fn destroy(&self, doc: &mut Document) -> usize {
        let own = self
            .input_listener()
            .take()
            .map_or(0, |id| usize::from(doc.remove_listener(id)));
        own + self.slider.destroy(doc) + self.table.destroy(doc)
    }
}
