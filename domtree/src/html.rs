//! HTML serialization.

use std::fmt::Write;

use crate::element::{Content, Element};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize an element tree to markup.
pub fn to_html(element: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, element);
    out
}

fn write_element(out: &mut String, el: &Element) {
    let _ = write!(out, "<{} id=\"{}\"", el.tag, escape_html(&el.id));

    if !el.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_html(&el.classes.join(" ")));
    }

    for (name, value) in &el.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
    }

    if !el.style.is_empty() {
        let style = el
            .style
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        let _ = write!(out, " style=\"{}\"", escape_html(&style));
    }

    out.push('>');

    if VOID_TAGS.contains(&el.tag.as_str()) {
        return;
    }

    match &el.content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape_html(text)),
        Content::Children(children) => {
            for child in children {
                write_element(out, child);
            }
        }
    }

    let _ = write!(out, "</{}>", el.tag);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_to_html_attributes_and_style() {
        let el = Element::div()
            .id("chart")
            .class("column-chart")
            .class("column-chart_loading")
            .data("element", "body")
            .style("--chart-height", "50");

        assert_eq!(
            to_html(&el),
            "<div id=\"chart\" class=\"column-chart column-chart_loading\" \
             data-element=\"body\" style=\"--chart-height: 50\"></div>"
        );
    }

    #[test]
    fn test_to_html_escapes_text() {
        let el = Element::text("<script>").id("t");
        assert_eq!(to_html(&el), "<span id=\"t\">&lt;script&gt;</span>");
    }

    #[test]
    fn test_void_tag_has_no_closing() {
        let el = Element::new("input").id("name").attr("type", "text");
        assert_eq!(to_html(&el), "<input id=\"name\" type=\"text\">");
    }
}
