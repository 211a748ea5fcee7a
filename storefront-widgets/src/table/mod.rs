//! Sortable, paginated table backed by a remote JSON source.
//!
//! The table keeps one ordered row set. Sorting is either local (a stable
//! in-memory re-sort) or remote (a fresh first page from the server), and
//! in remote mode scrolling near the bottom appends the next page.
//!
//! At most one load is outstanding per table. Sort and next-page requests
//! made while a load is in flight are dropped. Filter changes and reloads
//! always go out and supersede whatever is in flight: every load carries a
//! generation number and a response whose generation is no longer current
//! is discarded, so a stale response can never overwrite newer state.

mod column;
mod render;
mod state;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::atomic::{AtomicUsize, Ordering};

use domtree::{Document, Element, Event, EventKind, closest, escape_html};
use log::{debug, warn};
use storefront_api::model::decode_rows;
use storefront_api::query::{FilterState, FilterUpdate, PageWindow, SortState, TableQuery};
use storefront_api::{JsonFetcher, Row};
use url::Url;

pub use column::{CellRenderer, CellTemplate, Column, CustomSort, SortType};

use self::render::{header, render_rows, table_element};
use self::state::{LoadKind, LoadState, TableInner, sort_rows};
use crate::collate::{Collator, LocaleCollator};
use crate::error::{ConfigError, Error};
use crate::events::EventResult;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Construction options for [`SortableTable`].
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Data source. Query parameters are added per request.
    pub url: Url,
    /// Re-sort fetched rows in memory instead of asking the server.
    pub sort_locally: bool,
    pub page_size: usize,
    /// Defaults to the first sortable column, ascending.
    pub initial_sort: Option<SortState>,
    pub initial_filters: FilterState,
    /// Rows with an `id` render as links to `{row_link}{id}`.
    pub row_link: Option<String>,
}

impl TableConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            sort_locally: false,
            page_size: DEFAULT_PAGE_SIZE,
            initial_sort: None,
            initial_filters: FilterState::default(),
            row_link: None,
        }
    }

    pub fn sort_locally(mut self, local: bool) -> Self {
        self.sort_locally = local;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn initial_sort(mut self, sort: SortState) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    pub fn initial_filters(mut self, filters: FilterState) -> Self {
        self.initial_filters = filters;
        self
    }

    pub fn row_link(mut self, prefix: impl Into<String>) -> Self {
        self.row_link = Some(prefix.into());
        self
    }
}

/// What became of a sort, filter or pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The request took effect; `rows` is the number of rows it placed
    /// (the whole set after a replace, the new page after an append).
    Applied { rows: usize },
    /// Another load was in flight.
    Dropped,
    /// A newer load was issued before this one's response arrived; the
    /// response was discarded.
    Superseded,
    /// Not applicable: unknown or unsortable column, local mode for
    /// pagination, or no scroll trigger.
    Ignored,
}

/// Unique identifier for a table instance.
fn next_table_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!("sortable-table-{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// A sortable, paginated table.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SortableTable {
    id: String,
    columns: Arc<[Column]>,
    config: Arc<TableConfig>,
    fetcher: Arc<dyn JsonFetcher>,
    collator: Arc<dyn Collator>,
    inner: Arc<RwLock<TableInner>>,
}

impl std::fmt::Debug for SortableTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortableTable")
            .field("id", &self.id)
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("collator", &self.collator)
            .finish_non_exhaustive()
    }
}

impl SortableTable {
    /// Create a table. Fails on an empty or duplicated column list, a page
    /// size outside `1..=MAX_PAGE_SIZE`, or when there is nothing sortable
    /// to sort by.
    pub fn new(
        columns: Vec<Column>,
        config: TableConfig,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Result<Self, ConfigError> {
        if columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.id == column.id) {
                return Err(ConfigError::DuplicateColumn(column.id.clone()));
            }
        }

        let window = PageWindow::first(config.page_size)
            .ok_or(ConfigError::PageSize(config.page_size))?;

        let sort = match &config.initial_sort {
            Some(sort) => {
                let sortable = columns
                    .iter()
                    .any(|c| c.id == sort.column && c.is_sortable());
                if !sortable {
                    return Err(ConfigError::UnsortableColumn(sort.column.clone()));
                }
                sort.clone()
            }
            None => columns
                .iter()
                .find(|c| c.is_sortable())
                .map(|c| SortState::asc(&c.id))
                .ok_or(ConfigError::NoSortableColumn)?,
        };

        let inner = TableInner::new(sort, config.initial_filters.clone(), window);

        Ok(Self {
            id: next_table_id(),
            columns: columns.into(),
            config: Arc::new(config),
            fetcher,
            collator: Arc::new(LocaleCollator::default()),
            inner: Arc::new(RwLock::new(inner)),
        })
    }

    /// Replace the string collation strategy.
    pub fn with_collator(mut self, collator: Arc<dyn Collator>) -> Self {
        self.collator = collator;
        self
    }

    /// Use a fixed element ID instead of a generated one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, TableInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Root element ID; also the owner of this table's listeners.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn sort(&self) -> SortState {
        self.read().sort.clone()
    }

    pub fn filters(&self) -> FilterState {
        self.read().filters.clone()
    }

    pub fn window(&self) -> PageWindow {
        self.read().window
    }

    pub fn rows(&self) -> Vec<Row> {
        self.read().rows.clone()
    }

    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading()
    }

    fn sortable_column(&self, column_id: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.id == column_id && c.is_sortable())
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Current markup.
    pub fn element(&self) -> Element {
        table_element(&self.id, &self.columns, &self.read())
    }

    /// Mount into `doc` (registering the scroll and header listeners once)
    /// and return the markup.
    pub fn render(&self, doc: &mut Document) -> Element {
        self.mount(doc);
        self.element()
    }

    fn mount(&self, doc: &mut Document) {
        let mut inner = self.write();
        if !inner.listeners.is_empty() {
            return;
        }
        inner.listeners.push(doc.add_listener(EventKind::PointerDown, &self.id));
        inner.listeners.push(doc.add_listener(EventKind::Scroll, &self.id));
    }

    /// Release every listener this table registered. Returns how many.
    pub fn destroy(&self, doc: &mut Document) -> usize {
        let listeners = std::mem::take(&mut self.write().listeners);
        listeners
            .into_iter()
            .filter(|id| doc.remove_listener(*id))
            .count()
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Sort by `column_id`: the active column flips direction, any other
    /// sortable column starts ascending.
    pub async fn request_sort(&self, column_id: &str) -> Result<LoadOutcome, Error> {
        let Some(column) = self.sortable_column(column_id) else {
            debug!("{}: ignoring sort on `{column_id}`", self.id);
            return Ok(LoadOutcome::Ignored);
        };

        if self.config.sort_locally {
            return Ok(self.sort_locally(column));
        }

        self.load(LoadKind::Sort, |inner| TableQuery {
            sort: inner.sort.next_for(column_id),
            window: inner.window.reset(),
            filters: inner.filters.clone(),
        })
        .await
    }

    fn sort_locally(&self, column: &Column) -> LoadOutcome {
        let mut inner = self.write();
        if inner.is_loading() {
            return LoadOutcome::Dropped;
        }

        let sort = inner.sort.next_for(&column.id);
        sort_rows(&mut inner.rows, column, sort.direction, self.collator.as_ref());
        inner.body = render_rows(
            &self.id,
            &self.columns,
            self.config.row_link.as_deref(),
            &inner.rows,
            0,
        );
        inner.empty = Some(inner.rows.is_empty());
        inner.sort = sort;

        debug!("{}: sorted {} rows locally", self.id, inner.rows.len());
        LoadOutcome::Applied {
            rows: inner.rows.len(),
        }
    }

    /// Merge a filter change and reload from the first page.
    ///
    /// The title is trimmed and HTML-escaped before it is sent. Filters
    /// never apply locally, even in local sort mode.
    pub async fn set_filters(&self, update: FilterUpdate) -> Result<LoadOutcome, Error> {
        let update = FilterUpdate {
            title: update.title.map(|t| escape_html(t.trim())),
            ..update
        };

        self.load(LoadKind::Reload, |inner| {
            let (sort, filters) = inner.intent();
            TableQuery {
                sort: sort.clone(),
                window: inner.window.reset(),
                filters: filters.merged(&update),
            }
        })
        .await
    }

    /// Reload the first page with the current sort and filters.
    pub async fn reload(&self) -> Result<LoadOutcome, Error> {
        self.set_filters(FilterUpdate::default()).await
    }

    /// Fetch the page after the current window and append it.
    pub async fn extend_with_next_page(&self) -> Result<LoadOutcome, Error> {
        if self.config.sort_locally {
            return Ok(LoadOutcome::Ignored);
        }

        self.load(LoadKind::NextPage, |inner| TableQuery {
            sort: inner.sort.clone(),
            window: inner.window.next(),
            filters: inner.filters.clone(),
        })
        .await
    }

    /// Scroll handler: extends when the table's bottom edge has scrolled
    /// above the viewport bottom.
    pub async fn on_window_scroll(&self, doc: &Document) -> Result<LoadOutcome, Error> {
        if self.config.sort_locally {
            return Ok(LoadOutcome::Ignored);
        }

        let Some(rect) = doc.rect(&self.id) else {
            return Ok(LoadOutcome::Ignored);
        };
        if rect.bottom() >= doc.viewport.height || self.read().exhausted {
            return Ok(LoadOutcome::Ignored);
        }

        self.extend_with_next_page().await
    }

    /// Header pointer handler: sorts by the sortable cell under `target`.
    pub async fn on_header_pointer_down(&self, target: &str) -> Result<LoadOutcome, Error> {
        let cells = header(&self.id, &self.columns, &self.read().sort);

        let Some(cell) = closest(&cells, target, |el| el.data_attr("sortable") == Some("true"))
        else {
            return Ok(LoadOutcome::Ignored);
        };
        let Some(column_id) = cell.data_attr("id") else {
            return Ok(LoadOutcome::Ignored);
        };

        self.request_sort(column_id).await
    }

    /// Route a document event to the matching handler, if this table
    /// registered a listener for it.
    pub async fn handle_event(&self, doc: &Document, event: &Event) -> Result<EventResult, Error> {
        if !doc.is_listening(&self.id, event.kind()) {
            return Ok(EventResult::Ignored);
        }

        let outcome = match event {
            Event::PointerDown {
                target: Some(target),
                ..
            } => self.on_header_pointer_down(target).await?,
            Event::Scroll => self.on_window_scroll(doc).await?,
            _ => LoadOutcome::Ignored,
        };

        Ok(match outcome {
            LoadOutcome::Ignored => EventResult::Ignored,
            _ => EventResult::Consumed,
        })
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Issue one load. `plan` builds the query from current state.
    ///
    /// Nothing is committed until the response arrives: on failure the row
    /// set, sort, filters and window are exactly as before.
    async fn load(
        &self,
        kind: LoadKind,
        plan: impl FnOnce(&TableInner) -> TableQuery,
    ) -> Result<LoadOutcome, Error> {
        let (generation, query) = {
            let mut inner = self.write();
            if inner.is_loading() && !kind.supersedes() {
                debug!("{}: {kind:?} dropped, load in flight", self.id);
                return Ok(LoadOutcome::Dropped);
            }

            let query = plan(&inner);
            inner.generation += 1;
            let generation = inner.generation;
            inner.load = LoadState::Loading {
                generation,
                kind,
                query: query.clone(),
            };
            (generation, query)
        };

        let url = query.to_url(&self.config.url);
        debug!("{}: {kind:?} load #{generation}: {url}", self.id);

        let result = match self.fetcher.fetch_json(&url).await {
            Ok(body) => decode_rows(body),
            Err(err) => Err(err),
        };

        let mut inner = self.write();
        if inner.generation != generation {
            debug!("{}: discarding superseded load #{generation}", self.id);
            return Ok(LoadOutcome::Superseded);
        }
        inner.load = LoadState::Idle;

        let rows = match result {
            Ok(rows) => rows,
            Err(err) => {
                warn!("{}: load #{generation} failed: {err}", self.id);
                return Err(err.into());
            }
        };

        let count = rows.len();
        inner.exhausted = count < query.window.page_size();
        inner.window = query.window;

        if kind.replaces() {
            inner.body = render_rows(
                &self.id,
                &self.columns,
                self.config.row_link.as_deref(),
                &rows,
                0,
            );
            inner.rows = rows;
            inner.empty = Some(count == 0);
            inner.sort = query.sort;
            inner.filters = query.filters;
        } else {
            let first_index = inner.rows.len();
            let rendered = render_rows(
                &self.id,
                &self.columns,
                self.config.row_link.as_deref(),
                &rows,
                first_index,
            );
            inner.body.extend(rendered);
            inner.rows.extend(rows);
        }

        debug!(
            "{}: load #{generation} applied {count} rows ({} total)",
            self.id,
            inner.rows.len()
        );
        Ok(LoadOutcome::Applied { rows: count })
    }
}
