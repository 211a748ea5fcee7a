//! Table state and row ordering.

use std::borrow::Cow;
use std::cmp::Ordering;

use domtree::{Element, ListenerId};
use serde_json::Value;
use storefront_api::Row;
use storefront_api::query::{Direction, FilterState, PageWindow, SortState, TableQuery};

use super::column::{Column, SortType};
use crate::collate::Collator;

/// Why a load was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LoadKind {
    /// Header click in remote mode.
    Sort,
    /// Filter change or explicit reload.
    Reload,
    /// Infinite scroll.
    NextPage,
}

impl LoadKind {
    /// Whether this load may start while another is in flight, replacing it.
    /// Sorts and page extensions are dropped instead.
    pub fn supersedes(self) -> bool {
        matches!(self, Self::Reload)
    }

    /// Whether the response replaces the row set (as opposed to appending).
    pub fn replaces(self) -> bool {
        !matches!(self, Self::NextPage)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum LoadState {
    Idle,
    Loading {
        generation: u64,
        kind: LoadKind,
        query: TableQuery,
    },
}

/// Internal state for the sortable table.
#[derive(Debug)]
pub(super) struct TableInner {
    /// Committed sort.
    pub sort: SortState,
    /// Committed filters.
    pub filters: FilterState,
    /// Window of the last applied page.
    pub window: PageWindow,
    /// Rows in display order.
    pub rows: Vec<Row>,
    /// Rendered rows, parallel to `rows`.
    pub body: Vec<Element>,
    pub load: LoadState,
    /// Bumped by every issued load. A response whose generation is no
    /// longer current is discarded.
    pub generation: u64,
    /// Set after a wholesale replace; `None` until the first one.
    pub empty: Option<bool>,
    /// The last page came back short; scrolling stops requesting more.
    pub exhausted: bool,
    /// Document listeners registered by `mount`.
    pub listeners: Vec<ListenerId>,
}

impl TableInner {
    pub fn new(sort: SortState, filters: FilterState, window: PageWindow) -> Self {
        Self {
            sort,
            filters,
            window,
            rows: Vec::new(),
            body: Vec::new(),
            load: LoadState::Idle,
            generation: 0,
            empty: None,
            exhausted: false,
            listeners: Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading { .. })
    }

    /// Sort and filters of the newest request: the in-flight query if any,
    /// otherwise the committed state.
    pub fn intent(&self) -> (&SortState, &FilterState) {
        match &self.load {
            LoadState::Loading { query, .. } => (&query.sort, &query.filters),
            LoadState::Idle => (&self.sort, &self.filters),
        }
    }
}

/// Stable full re-sort of `rows` by `column`.
///
/// `slice::sort_by` is a stable merge sort, so rows with equal keys keep
/// their relative order in both directions.
pub(super) fn sort_rows(
    rows: &mut [Row],
    column: &Column,
    direction: Direction,
    collator: &dyn Collator,
) {
    let Some(sort_type) = &column.sort else {
        return;
    };
    rows.sort_by(|a, b| direction.apply(compare_rows(sort_type, &column.id, a, b, collator)));
}

fn compare_rows(
    sort_type: &SortType,
    id: &str,
    a: &Row,
    b: &Row,
    collator: &dyn Collator,
) -> Ordering {
    match sort_type {
        SortType::Number => compare_numbers(number_key(a.get(id)), number_key(b.get(id))),
        SortType::String => collator.compare(&text_key(a.get(id)), &text_key(b.get(id))),
        SortType::Custom(compare) => compare(a, b),
    }
}

fn number_key(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    };
    number.filter(|n| !n.is_nan())
}

fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

/// Display text of a cell value.
pub(super) fn text_key(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::collate::CodepointCollator;

    fn rows(value: serde_json::Value) -> Vec<Row> {
        storefront_api::model::decode_rows(value).unwrap()
    }

    fn ids(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r["id"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_number_sort_both_directions() {
        let column = Column::new("price", "Price").sortable(SortType::Number);
        let mut data = rows(json!([
            {"id": "b", "price": 30},
            {"id": "a", "price": 10},
            {"id": "c", "price": 20.5},
        ]));

        sort_rows(&mut data, &column, Direction::Asc, &CodepointCollator);
        assert_eq!(ids(&data), vec!["a", "c", "b"]);

        sort_rows(&mut data, &column, Direction::Desc, &CodepointCollator);
        assert_eq!(ids(&data), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_equal_keys_keep_insertion_order() {
        let column = Column::new("price", "Price").sortable(SortType::Number);
        let original = rows(json!([
            {"id": "x1", "price": 5},
            {"id": "y", "price": 1},
            {"id": "x2", "price": 5},
            {"id": "x3", "price": 5},
        ]));

        let mut asc = original.clone();
        sort_rows(&mut asc, &column, Direction::Asc, &CodepointCollator);
        assert_eq!(ids(&asc), vec!["y", "x1", "x2", "x3"]);

        let mut desc = original;
        sort_rows(&mut desc, &column, Direction::Desc, &CodepointCollator);
        assert_eq!(ids(&desc), vec!["x1", "x2", "x3", "y"]);
    }

    #[test]
    fn test_missing_and_string_numbers() {
        let column = Column::new("sales", "Sales").sortable(SortType::Number);
        let mut data = rows(json!([
            {"id": "a", "sales": "12"},
            {"id": "b"},
            {"id": "c", "sales": 3},
        ]));

        sort_rows(&mut data, &column, Direction::Asc, &CodepointCollator);
        assert_eq!(ids(&data), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_custom_sort_reversed_by_direction() {
        let column = Column::new("status", "Status").sort_with(|a, b| {
            let len = |r: &Row| r["status"].as_str().map_or(0, str::len);
            len(a).cmp(&len(b))
        });
        let mut data = rows(json!([
            {"id": "long", "status": "inactive"},
            {"id": "short", "status": "on"},
        ]));

        sort_rows(&mut data, &column, Direction::Asc, &CodepointCollator);
        assert_eq!(ids(&data), vec!["short", "long"]);

        sort_rows(&mut data, &column, Direction::Desc, &CodepointCollator);
        assert_eq!(ids(&data), vec!["long", "short"]);
    }

    #[test]
    fn test_unsortable_column_leaves_rows() {
        let column = Column::new("images", "Image");
        let mut data = rows(json!([{"id": "b"}, {"id": "a"}]));
        sort_rows(&mut data, &column, Direction::Asc, &CodepointCollator);
        assert_eq!(ids(&data), vec!["b", "a"]);
    }

    #[test]
    fn test_text_key() {
        assert_eq!(text_key(None), "");
        assert_eq!(text_key(Some(&json!(null))), "");
        assert_eq!(text_key(Some(&json!("Shoe"))), "Shoe");
        assert_eq!(text_key(Some(&json!(42))), "42");
    }
}
