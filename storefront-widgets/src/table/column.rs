//! Column definitions for the sortable table.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use domtree::Element;
use serde_json::Value;
use storefront_api::Row;

/// Comparator for [`SortType::Custom`], ascending.
pub type CustomSort = Arc<dyn Fn(&Row, &Row) -> Ordering + Send + Sync>;

/// Renders one cell from the row's value for the column.
pub type CellRenderer = Arc<dyn Fn(&Value) -> Element + Send + Sync>;

/// How a column's values are ordered.
#[derive(Clone)]
pub enum SortType {
    /// Numeric order. Missing or non-numeric values sort first.
    Number,
    /// Collated string order.
    String,
    /// Caller-provided comparator over whole rows.
    Custom(CustomSort),
}

impl fmt::Debug for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "Number"),
            Self::String => write!(f, "String"),
            Self::Custom(_) => write!(f, "Custom(...)"),
        }
    }
}

/// How a column's cells are rendered.
#[derive(Clone, Default)]
pub enum CellTemplate {
    /// `<div class="sortable-table__cell">value</div>`
    #[default]
    Default,
    Custom(CellRenderer),
}

impl fmt::Debug for CellTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "Default"),
            Self::Custom(_) => write!(f, "Custom(...)"),
        }
    }
}

/// A table column, identified by `id`.
///
/// # Example
///
/// ```
/// use storefront_widgets::table::{Column, SortType};
///
/// let columns = vec![
///     Column::new("images", "Image"),
///     Column::new("title", "Name").sortable(SortType::String),
///     Column::new("price", "Price").sortable(SortType::Number),
/// ];
/// assert!(columns[1].is_sortable());
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Row key this column reads.
    pub id: String,
    /// Header text.
    pub title: String,
    /// `Some` for sortable columns.
    pub sort: Option<SortType>,
    pub template: CellTemplate,
}

impl Column {
    /// A non-sortable column with the default cell template.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sort: None,
            template: CellTemplate::Default,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self, sort_type: SortType) -> Self {
        self.sort = Some(sort_type);
        self
    }

    /// Sortable with a custom row comparator.
    pub fn sort_with(
        self,
        compare: impl Fn(&Row, &Row) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sortable(SortType::Custom(Arc::new(compare)))
    }

    /// Render cells with a custom template.
    pub fn template(mut self, render: impl Fn(&Value) -> Element + Send + Sync + 'static) -> Self {
        self.template = CellTemplate::Custom(Arc::new(render));
        self
    }

    pub fn is_sortable(&self) -> bool {
        self.sort.is_some()
    }
}
