//! Dashboard: sales charts and best sellers for a date range.

use std::sync::Arc;

use async_trait::async_trait;
use domtree::{Document, Element, Event};
use log::debug;
use storefront_api::query::{DateRange, FilterState, FilterUpdate};
use storefront_widgets::{
    ChartConfig, ColumnChart, Error, EventResult, LocaleCollator, PickerConfig, RangePicker,
    SortableTable, TableConfig, WidgetEvent, calendar_locale,
};

use super::columns::product_columns;
use super::{Page, PageContext, first_handled};
use crate::error::RouteError;

#[derive(Debug)]
pub struct DashboardPage {
    picker: RangePicker,
    orders: ColumnChart,
    sales: ColumnChart,
    customers: ColumnChart,
    bestsellers: SortableTable,
}

impl DashboardPage {
    pub fn new(ctx: &PageContext) -> Result<Self, RouteError> {
        let locale = calendar_locale(&ctx.locales);
        let picker = RangePicker::new(PickerConfig::ending(ctx.today).locale(locale.clone()))
            .with_id("dashboard-range");
        let range = picker.selected();

        let chart = |name: &str| -> Result<ChartConfig, RouteError> {
            let url = ctx.endpoint(&format!("api/dashboard/{name}"))?;
            Ok(ChartConfig::new(name, url).locale(locale.clone()))
        };

        let orders = ColumnChart::new(chart("orders")?.link("/sales"), ctx.fetcher.clone())
            .with_id("dashboard-orders");
        let sales = ColumnChart::new(
            chart("sales")?.format_heading(|total| format!("${total}")),
            ctx.fetcher.clone(),
        )
        .with_id("dashboard-sales");
        let customers = ColumnChart::new(chart("customers")?, ctx.fetcher.clone())
            .with_id("dashboard-customers");

        let table_config = TableConfig::new(ctx.endpoint("api/dashboard/bestsellers")?)
            .sort_locally(true)
            .page_size(ctx.page_size)
            .row_link("/products/")
            .initial_filters(FilterState {
                date_range: Some(range),
                ..Default::default()
            });
        let bestsellers = SortableTable::new(product_columns(), table_config, ctx.fetcher.clone())?
            .with_collator(Arc::new(LocaleCollator::new(&ctx.locales)))
            .with_id("dashboard-bestsellers");

        Ok(Self {
            picker,
            orders,
            sales,
            customers,
            bestsellers,
        })
    }

    pub fn picker(&self) -> &RangePicker {
        &self.picker
    }

    pub fn charts(&self) -> [&ColumnChart; 3] {
        [&self.orders, &self.sales, &self.customers]
    }

    pub fn bestsellers(&self) -> &SortableTable {
        &self.bestsellers
    }

    /// Reload every chart and the best sellers for `range`.
    pub async fn update_range(&self, range: DateRange) -> Result<(), Error> {
        debug!("dashboard: range {} - {}", range.from, range.to);
        let (orders, sales, customers, table) = tokio::join!(
            self.orders.update(range),
            self.sales.update(range),
            self.customers.update(range),
            self.bestsellers
                .set_filters(FilterUpdate::new().date_range(range)),
        );
        orders?;
        sales?;
        customers?;
        table?;
        Ok(())
    }
}

#[async_trait]
impl Page for DashboardPage {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn render(&self, doc: &mut Document) -> Element {
        let chart_slot = |name: &str, chart: &ColumnChart| {
            Element::div()
                .id(format!("dashboard-{name}-slot"))
                .class(format!("dashboard__chart_{name}"))
                .data("element", format!("{name}Chart"))
                .child(chart.element())
        };

        Element::div()
            .id("dashboard")
            .class("dashboard")
            .child(
                Element::div()
                    .class("content__top-panel")
                    .child(Element::new("h1").class("page-title").child(Element::text("Dashboard")))
                    .child(
                        Element::div()
                            .data("element", "rangePicker")
                            .child(self.picker.render(doc)),
                    ),
            )
            .child(
                Element::div()
                    .class("dashboard__charts")
                    .data("element", "chartsRoot")
                    .child(chart_slot("orders", &self.orders))
                    .child(chart_slot("sales", &self.sales))
                    .child(chart_slot("customers", &self.customers)),
            )
            .child(Element::new("h3").class("block-title").child(Element::text("Best sellers")))
            .child(
                Element::div()
                    .data("element", "productsContainer")
                    .child(self.bestsellers.render(doc)),
            )
    }

    async fn load(&self) -> Result<(), Error> {
        self.update_range(self.picker.selected()).await
    }

    async fn handle_event(&self, doc: &mut Document, event: &Event) -> Result<EventResult, Error> {
        let picked = self.picker.handle_event(doc, event);
        if let Some(WidgetEvent::DateSelect(range)) = picked.emitted() {
            self.update_range(range).await?;
        }

        let table = self.bestsellers.handle_event(doc, event).await?;
        Ok(first_handled([picked, table]))
    }

    fn destroy(&self, doc: &mut Document) -> usize {
        self.picker.destroy(doc) + self.bestsellers.destroy(doc)
    }
}
