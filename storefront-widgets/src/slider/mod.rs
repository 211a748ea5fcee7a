//! Two-thumb range slider.
//!
//! Thumb positions are kept as percentages of the track: `left` is the left
//! thumb's distance from the track start, `right` the right thumb's distance
//! from the track end. The selected range is derived from them when a drag
//! ends and reported as a `range-select` event.

mod render;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use domtree::{Document, Element, Event, EventKind, ListenerId};
use log::{debug, warn};
use storefront_api::JsonFetcher;
use storefront_api::model::{decode_rows, max_field};
use storefront_api::query::PriceRange;
use url::Url;

use self::render::{inner_id, slider_element, thumb_left_id, thumb_right_id};
use crate::error::{ConfigError, Error};
use crate::events::{EventResult, WidgetEvent};

/// Formats a range value for the labels.
pub type ValueFormatter = Arc<dyn Fn(i64) -> String + Send + Sync>;

#[derive(Clone)]
pub struct SliderConfig {
    pub min: i64,
    pub max: i64,
    /// Defaults to the whole `min..=max` range.
    pub selected: Option<PriceRange>,
    pub format_value: ValueFormatter,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0,
            max: 4000,
            selected: None,
            format_value: Arc::new(|value| format!("${value}")),
        }
    }
}

impl fmt::Debug for SliderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderConfig")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl SliderConfig {
    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn selected(mut self, selected: PriceRange) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn format_value(mut self, format: impl Fn(i64) -> String + Send + Sync + 'static) -> Self {
        self.format_value = Arc::new(format);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Thumb {
    Left,
    Right,
}

/// An active thumb drag.
#[derive(Debug, Clone, Copy)]
struct Drag {
    thumb: Thumb,
    /// Pointer offset from the thumb's inner edge at grab time.
    shift_x: f64,
}

#[derive(Debug)]
struct SliderInner {
    min: i64,
    max: i64,
    selected: PriceRange,
    /// Left thumb offset, percent of the track.
    left: f64,
    /// Right thumb offset from the end, percent of the track.
    right: f64,
    drag: Option<Drag>,
    /// Thumb pointer-down registration, held while mounted.
    mounted: Option<ListenerId>,
    /// Pointer move/up registrations, held only while dragging.
    drag_listeners: Vec<ListenerId>,
}

impl SliderInner {
    fn span(&self) -> f64 {
        (self.max - self.min) as f64
    }

    /// Place the thumbs at the selected range.
    fn place_thumbs(&mut self) {
        let span = self.span();
        self.left = ((self.selected.from - self.min) as f64 / span * 100.0).floor();
        self.right = ((self.max - self.selected.to) as f64 / span * 100.0).floor();
    }

    /// Range under the thumbs' current positions.
    fn live_range(&self) -> (i64, i64) {
        let span = self.span();
        let from = (self.min as f64 + self.left * 0.01 * span).round() as i64;
        let to = (self.max as f64 - self.right * 0.01 * span).round() as i64;
        (from, to)
    }
}

fn next_slider_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!("range-slider-{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// A dual-handle range slider.
#[derive(Clone)]
pub struct DoubleSlider {
    id: String,
    format_value: ValueFormatter,
    inner: Arc<RwLock<SliderInner>>,
}

impl fmt::Debug for DoubleSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleSlider")
            .field("id", &self.id)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl DoubleSlider {
    pub fn new(config: SliderConfig) -> Result<Self, ConfigError> {
        let SliderConfig {
            min,
            max,
            selected,
            format_value,
        } = config;

        if min >= max {
            return Err(ConfigError::EmptyRange { min, max });
        }

        let selected = selected.unwrap_or(PriceRange::new(min, max));
        let from = selected.from.clamp(min, max);
        let to = selected.to.clamp(from, max);

        let mut inner = SliderInner {
            min,
            max,
            selected: PriceRange::new(from, to),
            left: 0.0,
            right: 0.0,
            drag: None,
            mounted: None,
            drag_listeners: Vec::new(),
        };
        inner.place_thumbs();

        Ok(Self {
            id: next_slider_id(),
            format_value,
            inner: Arc::new(RwLock::new(inner)),
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, SliderInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SliderInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Range committed by the last completed drag.
    pub fn selected(&self) -> PriceRange {
        self.read().selected
    }

    pub fn bounds(&self) -> (i64, i64) {
        let inner = self.read();
        (inner.min, inner.max)
    }

    /// Thumb offsets in percent: left from the start, right from the end.
    pub fn thumb_offsets(&self) -> (f64, f64) {
        let inner = self.read();
        (inner.left, inner.right)
    }

    pub fn is_dragging(&self) -> bool {
        self.read().drag.is_some()
    }

    pub fn element(&self) -> Element {
        slider_element(&self.id, &self.read(), self.format_value.as_ref())
    }

    pub fn render(&self, doc: &mut Document) -> Element {
        let mut inner = self.write();
        if inner.mounted.is_none() {
            inner.mounted = Some(doc.add_listener(EventKind::PointerDown, &self.id));
        }
        drop(inner);
        self.element()
    }

    /// Release every listener, including an unfinished drag's.
    pub fn destroy(&self, doc: &mut Document) -> usize {
        let mut inner = self.write();
        inner.drag = None;
        let mut ids = std::mem::take(&mut inner.drag_listeners);
        ids.extend(inner.mounted.take());
        ids.into_iter().filter(|id| doc.remove_listener(*id)).count()
    }

    /// Raise `max` to the highest `price` in the product list at `url`.
    ///
    /// The right thumb ends up at the new maximum. Returns the new maximum,
    /// or `None` when the list is empty or has no usable price.
    pub async fn sync_max_with(
        &self,
        fetcher: &dyn JsonFetcher,
        url: &Url,
    ) -> Result<Option<i64>, Error> {
        let rows = decode_rows(fetcher.fetch_json(url).await?)?;

        let Some(max) = max_field(&rows, "price").map(|price| price.ceil() as i64) else {
            return Ok(None);
        };

        let mut inner = self.write();
        if max <= inner.min {
            warn!("{}: ignoring max price {max}, not above min {}", self.id, inner.min);
            return Ok(None);
        }

        inner.max = max;
        inner.selected.to = max;
        inner.selected.from = inner.selected.from.min(max);
        inner.place_thumbs();
        debug!("{}: max synced to {max}", self.id);
        Ok(Some(max))
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn handle_event(&self, doc: &mut Document, event: &Event) -> EventResult {
        if !doc.is_listening(&self.id, event.kind()) {
            return EventResult::Ignored;
        }

        match event {
            Event::PointerDown {
                target: Some(target),
                client_x,
                ..
            } => self.on_pointer_down(doc, target, *client_x),
            Event::PointerMove { client_x, .. } => self.on_pointer_move(doc, *client_x),
            Event::PointerUp { .. } => self.on_pointer_up(doc),
            _ => EventResult::Ignored,
        }
    }

    /// Grab a thumb. The document starts delivering pointer moves and the
    /// release to this slider.
    pub fn on_pointer_down(&self, doc: &mut Document, target: &str, client_x: f64) -> EventResult {
        let thumb = if target == thumb_left_id(&self.id) {
            Thumb::Left
        } else if target == thumb_right_id(&self.id) {
            Thumb::Right
        } else {
            return EventResult::Ignored;
        };

        let Some(rect) = doc.rect(target) else {
            return EventResult::Ignored;
        };

        let shift_x = match thumb {
            Thumb::Left => rect.right() - client_x,
            Thumb::Right => rect.left() - client_x,
        };

        let mut inner = self.write();
        if inner.drag.is_none() {
            inner
                .drag_listeners
                .push(doc.add_listener(EventKind::PointerMove, &self.id));
            inner
                .drag_listeners
                .push(doc.add_listener(EventKind::PointerUp, &self.id));
        }
        inner.drag = Some(Drag { thumb, shift_x });

        EventResult::StartDrag
    }

    /// Move the grabbed thumb. Thumbs never cross: `left + right <= 100`.
    pub fn on_pointer_move(&self, doc: &Document, client_x: f64) -> EventResult {
        let mut inner = self.write();
        let Some(drag) = inner.drag else {
            return EventResult::Ignored;
        };
        let Some(track) = doc.rect(&inner_id(&self.id)) else {
            return EventResult::Ignored;
        };
        if track.width <= 0.0 {
            return EventResult::Ignored;
        }

        match drag.thumb {
            Thumb::Left => {
                let offset = (client_x - track.left() + drag.shift_x) / track.width;
                let offset = offset.max(0.0) * 100.0;
                inner.left = if offset + inner.right > 100.0 {
                    100.0 - inner.right
                } else {
                    offset
                };
            }
            Thumb::Right => {
                let offset = (track.right() - client_x - drag.shift_x) / track.width;
                let offset = offset.max(0.0) * 100.0;
                inner.right = if inner.left + offset > 100.0 {
                    100.0 - inner.left
                } else {
                    offset
                };
            }
        }

        EventResult::Consumed
    }

    /// Drop the thumb, commit the range and emit `range-select`.
    pub fn on_pointer_up(&self, doc: &mut Document) -> EventResult {
        let mut inner = self.write();
        if inner.drag.take().is_none() {
            return EventResult::Ignored;
        }

        for id in inner.drag_listeners.drain(..) {
            doc.remove_listener(id);
        }

        let (from, to) = inner.live_range();
        inner.selected = PriceRange::new(from, to);
        debug!("{}: selected {from}..={to}", self.id);

        EventResult::Emit(WidgetEvent::RangeSelect { from, to })
    }
}

#[cfg(test)]
mod tests {
    use domtree::{Rect, Viewport};
    use serde_json::json;
    use storefront_api::StaticFetcher;

    use super::render::DRAGGING_CLASS;
    use super::*;

    /// Track from x=100 to x=500, thumbs 10px wide centred on their
    /// positions.
    fn document(slider: &DoubleSlider) -> Document {
        let mut doc = Document::new(Viewport {
            width: 1024.0,
            height: 768.0,
        });
        doc.layout.insert(inner_id(slider.id()), Rect::new(100.0, 0.0, 400.0, 10.0));
        doc.layout
            .insert(thumb_left_id(slider.id()), Rect::new(95.0, 0.0, 10.0, 10.0));
        doc.layout
            .insert(thumb_right_id(slider.id()), Rect::new(495.0, 0.0, 10.0, 10.0));
        doc
    }

    #[test]
    fn test_defaults_and_initial_offsets() {
        let slider = DoubleSlider::new(SliderConfig::default()).unwrap();
        assert_eq!(slider.bounds(), (0, 4000));
        assert_eq!(slider.selected(), PriceRange::new(0, 4000));
        assert_eq!(slider.thumb_offsets(), (0.0, 0.0));

        let slider =
            DoubleSlider::new(SliderConfig::default().selected(PriceRange::new(1000, 3000)))
                .unwrap();
        assert_eq!(slider.thumb_offsets(), (25.0, 25.0));

        let slider = DoubleSlider::new(
            SliderConfig::default()
                .range(0, 3)
                .selected(PriceRange::new(1, 2)),
        )
        .unwrap();
        assert_eq!(slider.thumb_offsets(), (33.0, 33.0));
    }

    #[test]
    fn test_empty_range_rejected() {
        let err = DoubleSlider::new(SliderConfig::default().range(10, 10)).unwrap_err();
        assert_eq!(err, ConfigError::EmptyRange { min: 10, max: 10 });
    }

    #[test]
    fn test_labels_use_formatter() {
        let config = SliderConfig::default().format_value(|v| format!("{v} €"));
        let slider = DoubleSlider::new(config).unwrap();
        let html = domtree::to_html(&slider.element());
        assert!(html.contains("0 €"));
        assert!(html.contains("4000 €"));
    }

    #[test]
    fn test_drag_left_thumb_emits_range() {
        let slider = DoubleSlider::new(SliderConfig::default()).unwrap();
        let mut doc = document(&slider);
        slider.render(&mut doc);

        let down = Event::PointerDown {
            target: Some(thumb_left_id(slider.id())),
            client_x: 100.0,
            client_y: 5.0,
        };
        assert_eq!(slider.handle_event(&mut doc, &down), EventResult::StartDrag);
        assert!(slider.is_dragging());
        assert!(slider.element().has_class(DRAGGING_CLASS));
        assert!(doc.is_listening(slider.id(), EventKind::PointerMove));

        let drag = Event::PointerMove {
            client_x: 195.0,
            client_y: 5.0,
        };
        assert_eq!(slider.handle_event(&mut doc, &drag), EventResult::Consumed);
        assert_eq!(slider.thumb_offsets(), (25.0, 0.0));

        // live label, committed range unchanged until release
        assert!(domtree::to_html(&slider.element()).contains("$1000"));
        assert_eq!(slider.selected(), PriceRange::new(0, 4000));

        let up = Event::PointerUp {
            client_x: 195.0,
            client_y: 5.0,
        };
        let result = slider.handle_event(&mut doc, &up);
        assert_eq!(
            result.emitted(),
            Some(WidgetEvent::RangeSelect { from: 1000, to: 4000 })
        );
        assert_eq!(slider.selected(), PriceRange::new(1000, 4000));
        assert!(!slider.is_dragging());
        assert!(!slider.element().has_class(DRAGGING_CLASS));
        assert!(!doc.is_listening(slider.id(), EventKind::PointerMove));
        assert!(!doc.is_listening(slider.id(), EventKind::PointerUp));
    }

    #[test]
    fn test_thumbs_never_cross() {
        let slider = DoubleSlider::new(SliderConfig::default()).unwrap();
        let mut doc = document(&slider);
        slider.render(&mut doc);

        slider.on_pointer_down(&mut doc, &thumb_left_id(slider.id()), 100.0);
        slider.on_pointer_move(&doc, 195.0);
        slider.on_pointer_up(&mut doc);

        slider.on_pointer_down(&mut doc, &thumb_right_id(slider.id()), 500.0);
        slider.on_pointer_move(&doc, 405.0);
        assert_eq!(slider.thumb_offsets(), (25.0, 25.0));

        // Past the left thumb: pinned at 100 - left
        slider.on_pointer_move(&doc, 50.0);
        assert_eq!(slider.thumb_offsets(), (25.0, 75.0));

        // Past the track end: clamped to zero
        slider.on_pointer_move(&doc, 900.0);
        assert_eq!(slider.thumb_offsets(), (25.0, 0.0));

        slider.on_pointer_move(&doc, 405.0);
        let result = slider.on_pointer_up(&mut doc);
        assert_eq!(
            result.emitted(),
            Some(WidgetEvent::RangeSelect { from: 1000, to: 3000 })
        );
    }

    #[test]
    fn test_pointer_down_elsewhere_ignored() {
        let slider = DoubleSlider::new(SliderConfig::default()).unwrap();
        let mut doc = document(&slider);
        slider.render(&mut doc);

        let result = slider.on_pointer_down(&mut doc, &inner_id(slider.id()), 200.0);
        assert_eq!(result, EventResult::Ignored);
        assert_eq!(slider.on_pointer_up(&mut doc), EventResult::Ignored);
    }

    #[test]
    fn test_destroy_releases_drag_listeners() {
        let slider = DoubleSlider::new(SliderConfig::default()).unwrap();
        let mut doc = document(&slider);
        slider.render(&mut doc);
        slider.on_pointer_down(&mut doc, &thumb_left_id(slider.id()), 100.0);
        assert_eq!(doc.listeners().owned_by(slider.id()), 3);

        assert_eq!(slider.destroy(&mut doc), 3);
        assert!(doc.listeners().is_empty());
        assert!(!slider.is_dragging());
    }

    #[tokio::test]
    async fn test_sync_max_with_products() {
        let fetcher = StaticFetcher::new().route(
            "/api/rest/products",
            json!([{"price": 120}, {"price": 3499.5}, {"title": "no price"}]),
        );
        let url = Url::parse("http://localhost:3001/api/rest/products").unwrap();
        let slider = DoubleSlider::new(SliderConfig::default()).unwrap();

        let max = slider.sync_max_with(&fetcher, &url).await.unwrap();
        assert_eq!(max, Some(3500));
        assert_eq!(slider.bounds(), (0, 3500));
        assert_eq!(slider.selected(), PriceRange::new(0, 3500));
        assert!(domtree::to_html(&slider.element()).contains("$3500"));

        let empty = StaticFetcher::new().route("/api/rest/products", json!([]));
        assert_eq!(slider.sync_max_with(&empty, &url).await.unwrap(), None);
        assert_eq!(slider.bounds(), (0, 3500));
    }
}
