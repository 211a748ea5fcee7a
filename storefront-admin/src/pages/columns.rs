//! Product table columns shared by the dashboard and the product list.

use domtree::Element;
use serde_json::Value;
use storefront_widgets::table::{Column, SortType};

fn cell() -> Element {
    Element::div().class("sortable-table__cell")
}

/// First image of a product's `images` list.
fn image_cell(value: &Value) -> Element {
    let src = value
        .as_array()
        .and_then(|images| images.first())
        .and_then(|image| image.get("url"))
        .and_then(Value::as_str);

    match src {
        Some(src) => cell().child(
            Element::new("img")
                .class("sortable-table-image")
                .attr("alt", "Image")
                .attr("src", src),
        ),
        None => cell(),
    }
}

fn status_cell(value: &Value) -> Element {
    let active = match value {
        Value::Number(n) => n.as_i64() == Some(1),
        Value::Bool(b) => *b,
        Value::String(s) => s == "1",
        _ => false,
    };
    cell().child(Element::text(if active { "Active" } else { "Inactive" }))
}

/// Columns for product tables.
pub(crate) fn product_columns() -> Vec<Column> {
    vec![
        Column::new("images", "Image").template(image_cell),
        Column::new("title", "Name").sortable(SortType::String),
        Column::new("quantity", "Quantity").sortable(SortType::Number),
        Column::new("price", "Price").sortable(SortType::Number),
        Column::new("status", "Status")
            .sortable(SortType::Number)
            .template(status_cell),
    ]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_image_cell_uses_first_url() {
        let html = domtree::to_html(&image_cell(&json!([
            {"url": "https://cdn.example.com/a.jpg", "source": "a.jpg"},
            {"url": "https://cdn.example.com/b.jpg", "source": "b.jpg"},
        ])));
        assert!(html.contains("src=\"https://cdn.example.com/a.jpg\""));
        assert!(!html.contains("b.jpg"));

        assert!(image_cell(&json!(null)).child_elements().is_empty());
    }

    #[test]
    fn test_status_cell() {
        assert_eq!(status_cell(&json!(1)).text_content(), "Active");
        assert_eq!(status_cell(&json!(0)).text_content(), "Inactive");
        assert_eq!(status_cell(&json!("1")).text_content(), "Active");
    }

    #[test]
    fn test_title_is_default_sort() {
        let columns = product_columns();
        let first_sortable = columns.iter().find(|c| c.is_sortable()).unwrap();
        assert_eq!(first_sortable.id, "title");
    }
}
