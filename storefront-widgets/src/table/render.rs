//! Markup for the sortable table.
//!
//! Header cells, the sort arrow and the fixed regions carry IDs derived
//! from the table ID so event targets stay valid across re-renders.

use domtree::{Content, Element};
use serde_json::Value;
use storefront_api::Row;
use storefront_api::query::SortState;

use super::column::{CellTemplate, Column};
use super::state::{TableInner, text_key};

pub(super) const LOADING_CLASS: &str = "sortable-table_loading";
pub(super) const EMPTY_CLASS: &str = "sortable-table_empty";

pub(super) fn header_cell_id(table_id: &str, column_id: &str) -> String {
    format!("{table_id}-cell-{column_id}")
}

pub(super) fn header_id(table_id: &str) -> String {
    format!("{table_id}-header")
}

/// The whole table: header, body, loading line and empty placeholder.
pub(super) fn table_element(table_id: &str, columns: &[Column], inner: &TableInner) -> Element {
    let mut root = Element::div()
        .id(table_id)
        .class("sortable-table")
        .child(header(table_id, columns, &inner.sort))
        .child(
            Element::div()
                .id(format!("{table_id}-body"))
                .class("sortable-table__body")
                .data("element", "body")
                .children(inner.body.iter().cloned()),
        )
        .child(
            Element::div()
                .id(format!("{table_id}-loading"))
                .class("loading-line")
                .class("sortable-table__loading-line")
                .data("element", "loading"),
        )
        .child(
            Element::div()
                .id(format!("{table_id}-empty"))
                .class("sortable-table__empty-placeholder")
                .data("element", "emptyPlaceholder")
                .child(Element::div().id(format!("{table_id}-empty-text")).content(
                    Content::Text("No data".to_string()),
                )),
        );

    root.toggle_class(LOADING_CLASS, inner.is_loading());
    root.toggle_class(EMPTY_CLASS, inner.empty == Some(true));
    root
}

pub(super) fn header(table_id: &str, columns: &[Column], sort: &SortState) -> Element {
    Element::div()
        .id(header_id(table_id))
        .class("sortable-table__header")
        .class("sortable-table__row")
        .data("element", "header")
        .children(columns.iter().map(|column| header_cell(table_id, column, sort)))
}

fn header_cell(table_id: &str, column: &Column, sort: &SortState) -> Element {
    let cell_id = header_cell_id(table_id, &column.id);
    let mut cell = Element::div()
        .id(&cell_id)
        .class("sortable-table__cell")
        .data("id", &column.id)
        .data("sortable", column.is_sortable().to_string())
        .child(Element::text(&column.title).id(format!("{cell_id}-title")));

    if column.is_sortable() && sort.column == column.id {
        cell.set_attr("data-order", sort.direction.as_str());
        cell.push_child(sort_arrow(table_id));
    }

    cell
}

fn sort_arrow(table_id: &str) -> Element {
    Element::span()
        .id(format!("{table_id}-arrow"))
        .class("sortable-table__sort-arrow")
        .data("element", "arrow")
        .child(
            Element::span()
                .id(format!("{table_id}-arrow-icon"))
                .class("sort-arrow"),
        )
}

/// Render rows; `first_index` is the position of `rows[0]` in the row set.
pub(super) fn render_rows(
    table_id: &str,
    columns: &[Column],
    row_link: Option<&str>,
    rows: &[Row],
    first_index: usize,
) -> Vec<Element> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| render_row(table_id, columns, row_link, row, first_index + i))
        .collect()
}

fn render_row(
    table_id: &str,
    columns: &[Column],
    row_link: Option<&str>,
    row: &Row,
    index: usize,
) -> Element {
    let link = row_link.zip(row.get("id")).map(|(prefix, id)| format!("{prefix}{}", text_key(Some(id))));

    let element = match link {
        Some(href) => Element::anchor(href),
        None => Element::div(),
    };

    element
        .id(format!("{table_id}-row-{index}"))
        .class("sortable-table__row")
        .children(columns.iter().map(|column| render_cell(column, row.get(&column.id))))
}

fn render_cell(column: &Column, value: Option<&Value>) -> Element {
    match &column.template {
        CellTemplate::Custom(render) => render(value.unwrap_or(&Value::Null)),
        CellTemplate::Default => Element::div()
            .class("sortable-table__cell")
            .content(Content::Text(text_key(value).into_owned())),
    }
}
