//! Column chart of a date-keyed series.
//!
//! Each update fetches `{url}?from=..&to=..`, which answers with an object
//! mapping dates to numbers. The header shows the formatted total and every
//! entry becomes one column scaled against the largest value.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use domtree::{Content, Element};
use log::{debug, warn};
use storefront_api::JsonFetcher;
use storefront_api::model::{SeriesPoint, decode_series};
use storefront_api::query::{DateRange, date_range_params, with_params};
use url::Url;

use crate::error::Error;
use crate::locale::{CalendarLocale, English};

/// Height of the tallest column, in chart units.
pub const CHART_HEIGHT: u32 = 50;

const LOADING_CLASS: &str = "column-chart_loading";

/// Formats the series total for the header.
pub type HeadingFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

#[derive(Clone)]
pub struct ChartConfig {
    /// Shown as "Total {label}".
    pub label: String,
    /// Target of the "View all" link; no link when `None`.
    pub link: Option<String>,
    pub url: Url,
    pub format_heading: HeadingFormatter,
    pub locale: Arc<dyn CalendarLocale>,
}

impl fmt::Debug for ChartConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartConfig")
            .field("label", &self.label)
            .field("link", &self.link)
            .field("url", &self.url.as_str())
            .field("locale", &self.locale.tag())
            .finish_non_exhaustive()
    }
}

impl ChartConfig {
    pub fn new(label: impl Into<String>, url: Url) -> Self {
        Self {
            label: label.into(),
            link: None,
            url,
            format_heading: Arc::new(|total| total.to_string()),
            locale: Arc::new(English),
        }
    }

    pub fn link(mut self, href: impl Into<String>) -> Self {
        self.link = Some(href.into());
        self
    }

    pub fn format_heading(mut self, format: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        self.format_heading = Arc::new(format);
        self
    }

    pub fn locale(mut self, locale: Arc<dyn CalendarLocale>) -> Self {
        self.locale = locale;
        self
    }
}

/// One rendered column.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartColumn {
    /// Height in chart units, `0..=CHART_HEIGHT`.
    pub value: u32,
    /// Share of the largest value, rounded percent.
    pub percent: u32,
    /// Tooltip date, medium-formatted.
    pub date: String,
}

#[derive(Debug, Default)]
struct ChartInner {
    range: Option<DateRange>,
    loading: bool,
    heading: String,
    columns: Vec<ChartColumn>,
    generation: u64,
}

fn next_chart_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!("column-chart-{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Scale a series into columns.
fn scale_columns(points: &[SeriesPoint], locale: &dyn CalendarLocale) -> Vec<ChartColumn> {
    let max = points.iter().map(|p| p.value).fold(0.0, f64::max);
    let scale = if max > 0.0 {
        f64::from(CHART_HEIGHT) / max
    } else {
        0.0
    };

    points
        .iter()
        .map(|point| ChartColumn {
            value: (point.value * scale).floor().max(0.0) as u32,
            percent: if max > 0.0 {
                (point.value / max * 100.0).round().max(0.0) as u32
            } else {
                0
            },
            date: tooltip_date(&point.key, locale),
        })
        .collect()
}

/// Series keys are ISO dates, optionally with a time part.
fn tooltip_date(key: &str, locale: &dyn CalendarLocale) -> String {
    key.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(|date| locale.format_medium(date))
        .unwrap_or_else(|| key.to_string())
}

/// A column chart.
#[derive(Clone)]
pub struct ColumnChart {
    id: String,
    config: Arc<ChartConfig>,
    fetcher: Arc<dyn JsonFetcher>,
    inner: Arc<RwLock<ChartInner>>,
}

impl fmt::Debug for ColumnChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnChart")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl ColumnChart {
    /// A chart in the loading state; call [`update`](Self::update) to fill it.
    pub fn new(config: ChartConfig, fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            id: next_chart_id(),
            config: Arc::new(config),
            fetcher,
            inner: Arc::new(RwLock::new(ChartInner {
                loading: true,
                ..Default::default()
            })),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, ChartInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ChartInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn range(&self) -> Option<DateRange> {
        self.read().range
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn heading(&self) -> String {
        self.read().heading.clone()
    }

    pub fn columns(&self) -> Vec<ChartColumn> {
        self.read().columns.clone()
    }

    /// Load the series for `range`.
    ///
    /// Header and columns are cleared first. An empty series leaves the
    /// chart in its loading state, as does a failed fetch. Returns the
    /// number of columns drawn; a response overtaken by a newer update is
    /// dropped and reports zero.
    pub async fn update(&self, range: DateRange) -> Result<usize, Error> {
        let generation = {
            let mut inner = self.write();
            inner.range = Some(range);
            inner.loading = true;
            inner.heading.clear();
            inner.columns.clear();
            inner.generation += 1;
            inner.generation
        };

        let url = with_params(&self.config.url, &date_range_params(&range));
        debug!("{}: loading {url}", self.id);

        let result = match self.fetcher.fetch_json(&url).await {
            Ok(body) => decode_series(body),
            Err(err) => Err(err),
        };

        let mut inner = self.write();
        if inner.generation != generation {
            return Ok(0);
        }

        let points = result.inspect_err(|err| warn!("{}: update failed: {err}", self.id))?;
        if points.is_empty() {
            return Ok(0);
        }

        let total: f64 = points.iter().map(|p| p.value).sum();
        inner.heading = (self.config.format_heading)(total);
        inner.columns = scale_columns(&points, self.config.locale.as_ref());
        inner.loading = false;

        Ok(inner.columns.len())
    }

    pub fn element(&self) -> Element {
        let inner = self.read();
        let id = &self.id;

        let mut title = Element::div()
            .id(format!("{id}-title"))
            .class("column-chart__title")
            .child(Element::text(format!("Total {}", self.config.label)));
        if let Some(link) = &self.config.link {
            title.push_child(
                Element::anchor(link)
                    .class("column-chart__link")
                    .content(Content::Text("View all".to_string())),
            );
        }

        let body = inner.columns.iter().map(|column| {
            let tooltip = format!(
                "<span><small>{}</small><br /><strong>{}%</strong></span>",
                column.date, column.percent
            );
            Element::div()
                .style("--value", column.value.to_string())
                .attr("data-tooltip", tooltip)
        });

        let mut root = Element::div()
            .id(id)
            .class("column-chart")
            .style("--chart-height", CHART_HEIGHT.to_string())
            .child(title)
            .child(
                Element::div()
                    .class("column-chart__container")
                    .child(
                        Element::div()
                            .id(format!("{id}-header"))
                            .class("column-chart__header")
                            .data("element", "header")
                            .content(Content::Text(inner.heading.clone())),
                    )
                    .child(
                        Element::div()
                            .id(format!("{id}-body"))
                            .class("column-chart__chart")
                            .data("element", "body")
                            .children(body),
                    ),
            );
        root.toggle_class(LOADING_CLASS, inner.loading);
        root
    }
}
