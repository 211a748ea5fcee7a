//! Markup for the double slider.

use domtree::Element;

use super::SliderInner;

pub(super) const DRAGGING_CLASS: &str = "range-slider_dragging";

pub(super) fn thumb_left_id(slider_id: &str) -> String {
    format!("{slider_id}-thumb-left")
}

pub(super) fn thumb_right_id(slider_id: &str) -> String {
    format!("{slider_id}-thumb-right")
}

pub(super) fn inner_id(slider_id: &str) -> String {
    format!("{slider_id}-inner")
}

fn percent(value: f64) -> String {
    format!("{value}%")
}

pub(super) fn slider_element(
    slider_id: &str,
    inner: &SliderInner,
    format_value: &dyn Fn(i64) -> String,
) -> Element {
    let (from, to) = inner.live_range();
    let left = percent(inner.left);
    let right = percent(inner.right);

    let mut root = Element::div()
        .id(slider_id)
        .class("range-slider")
        .child(
            Element::text(format_value(from))
                .id(format!("{slider_id}-from"))
                .data("element", "from"),
        )
        .child(
            Element::div()
                .id(inner_id(slider_id))
                .class("range-slider__inner")
                .data("element", "inner")
                .child(
                    Element::span()
                        .id(format!("{slider_id}-progress"))
                        .class("range-slider__progress")
                        .data("element", "progress")
                        .style("left", &left)
                        .style("right", &right),
                )
                .child(
                    Element::span()
                        .id(thumb_left_id(slider_id))
                        .class("range-slider__thumb-left")
                        .data("element", "thumbLeft")
                        .style("left", left),
                )
                .child(
                    Element::span()
                        .id(thumb_right_id(slider_id))
                        .class("range-slider__thumb-right")
                        .data("element", "thumbRight")
                        .style("right", right),
                ),
        )
        .child(
            Element::text(format_value(to))
                .id(format!("{slider_id}-to"))
                .data("element", "to"),
        );

    root.toggle_class(DRAGGING_CLASS, inner.drag.is_some());
    root
}
