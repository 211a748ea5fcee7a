//! Calendar date-range picker.
//!
//! Clicking the input toggles a two-month selector. The first day clicked
//! starts a range, the second completes it (the earlier date becomes
//! `from`), emits `date-select` and closes the selector. A capture-phase
//! document click outside the picker closes it as well.

mod calendar;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use domtree::{Document, Element, Event, EventKind, ListenerId, closest, find_element};
use log::debug;
use storefront_api::query::DateRange;

use self::calendar::{CELL_CLASS, Highlight, first_of_month, month_calendar, shift_month};
use crate::events::{EventResult, WidgetEvent};
use crate::locale::{CalendarLocale, English};

const OPEN_CLASS: &str = "rangepicker_open";

#[derive(Clone)]
pub struct PickerConfig {
    /// Defaults to two months before `to`.
    pub from: Option<NaiveDate>,
    pub to: NaiveDate,
    pub locale: Arc<dyn CalendarLocale>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::ending(Utc::now().date_naive())
    }
}

impl fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerConfig")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("locale", &self.locale.tag())
            .finish()
    }
}

impl PickerConfig {
    /// A range ending on `to`.
    pub fn ending(to: NaiveDate) -> Self {
        Self {
            from: None,
            to,
            locale: Arc::new(English),
        }
    }

    pub fn starting(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn locale(mut self, locale: Arc<dyn CalendarLocale>) -> Self {
        self.locale = locale;
        self
    }
}

#[derive(Debug)]
struct PickerInner {
    /// Last completed range; shown in the input.
    from: NaiveDate,
    to: NaiveDate,
    /// First click of a selection in progress.
    pending: Option<NaiveDate>,
    /// First of the left-hand month.
    shown: NaiveDate,
    open: bool,
    listeners: Vec<ListenerId>,
}

impl PickerInner {
    fn highlight(&self) -> Highlight {
        match self.pending {
            Some(from) => Highlight { from, to: None },
            None => Highlight {
                from: self.from,
                to: Some(self.to),
            },
        }
    }
}

fn next_picker_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!("rangepicker-{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// A two-month date-range picker.
#[derive(Clone)]
pub struct RangePicker {
    id: String,
    locale: Arc<dyn CalendarLocale>,
    inner: Arc<RwLock<PickerInner>>,
}

impl fmt::Debug for RangePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangePicker")
            .field("id", &self.id)
            .field("locale", &self.locale.tag())
            .field("inner", &self.inner)
            .finish()
    }
}

impl RangePicker {
    pub fn new(config: PickerConfig) -> Self {
        let to = config.to;
        let from = config
            .from
            .unwrap_or_else(|| to.checked_sub_months(Months::new(2)).unwrap_or(to));

        Self {
            id: next_picker_id(),
            locale: config.locale,
            inner: Arc::new(RwLock::new(PickerInner {
                from,
                to,
                pending: None,
                shown: first_of_month(from),
                open: false,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, PickerInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PickerInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The last completed range, from midnight to midnight UTC.
    pub fn selected(&self) -> DateRange {
        let inner = self.read();
        DateRange::new(midnight(inner.from), midnight(inner.to))
    }

    pub fn is_open(&self) -> bool {
        self.read().open
    }

    /// First day of the left-hand month.
    pub fn shown_month(&self) -> NaiveDate {
        self.read().shown
    }

    fn input_id(&self) -> String {
        format!("{}-input", self.id)
    }

    fn prev_id(&self) -> String {
        format!("{}-prev", self.id)
    }

    fn next_id(&self) -> String {
        format!("{}-next", self.id)
    }

    pub fn element(&self) -> Element {
        let inner = self.read();
        let id = &self.id;

        let input = Element::div()
            .id(self.input_id())
            .class("rangepicker__input")
            .data("element", "input")
            .child(
                Element::text(self.locale.format_short(inner.from))
                    .id(format!("{id}-from"))
                    .data("element", "from"),
            )
            .child(Element::text(" - ").id(format!("{id}-dash")))
            .child(
                Element::text(self.locale.format_short(inner.to))
                    .id(format!("{id}-to"))
                    .data("element", "to"),
            );

        let mut selector = Element::div()
            .id(format!("{id}-selector"))
            .class("rangepicker__selector")
            .data("element", "selector");

        if inner.open {
            let highlight = inner.highlight();
            let second = shift_month(inner.shown, true);
            selector = selector
                .child(Element::div().class("rangepicker__selector-arrow"))
                .child(
                    Element::div()
                        .id(self.prev_id())
                        .class("rangepicker__selector-control-left"),
                )
                .child(
                    Element::div()
                        .id(self.next_id())
                        .class("rangepicker__selector-control-right"),
                )
                .child(month_calendar(id, inner.shown, &highlight, self.locale.as_ref()))
                .child(month_calendar(id, second, &highlight, self.locale.as_ref()));
        }

        let mut root = Element::div()
            .id(id)
            .class("rangepicker")
            .child(input)
            .child(selector);
        root.toggle_class(OPEN_CLASS, inner.open);
        root
    }

    /// Register the picker's own click listener and the capture-phase
    /// document click that closes it.
    pub fn render(&self, doc: &mut Document) -> Element {
        {
            let mut inner = self.write();
            if inner.listeners.is_empty() {
                inner.listeners.push(doc.add_listener(EventKind::Click, &self.id));
                inner
                    .listeners
                    .push(doc.add_capture_listener(EventKind::Click, &self.id));
            }
        }
        self.element()
    }

    pub fn destroy(&self, doc: &mut Document) -> usize {
        let listeners = std::mem::take(&mut self.write().listeners);
        listeners
            .into_iter()
            .filter(|id| doc.remove_listener(*id))
            .count()
    }

    pub fn toggle(&self) {
        let mut inner = self.write();
        inner.open = !inner.open;
    }

    pub fn close(&self) {
        self.write().open = false;
    }

    pub fn prev(&self) {
        let mut inner = self.write();
        inner.shown = shift_month(inner.shown, false);
    }

    pub fn next(&self) {
        let mut inner = self.write();
        inner.shown = shift_month(inner.shown, true);
    }

    /// Pick a day. Completes the range on every second pick.
    pub fn select_day(&self, date: NaiveDate) -> EventResult {
        let mut inner = self.write();

        let Some(start) = inner.pending.take() else {
            inner.pending = Some(date);
            return EventResult::Consumed;
        };

        let (from, to) = if date > start {
            (start, date)
        } else {
            (date, start)
        };
        inner.from = from;
        inner.to = to;
        inner.open = false;
        debug!("{}: selected {from} - {to}", self.id);

        EventResult::Emit(WidgetEvent::DateSelect(DateRange::new(
            midnight(from),
            midnight(to),
        )))
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn handle_event(&self, doc: &Document, event: &Event) -> EventResult {
        if !doc.is_listening(&self.id, EventKind::Click) {
            return EventResult::Ignored;
        }
        match event {
            Event::Click { target } => self.on_click(target.as_deref()),
            _ => EventResult::Ignored,
        }
    }

    /// Dispatch a click anywhere in the document.
    pub fn on_click(&self, target: Option<&str>) -> EventResult {
        let element = self.element();

        let inside = target.filter(|target| find_element(&element, target).is_some());
        let Some(target) = inside else {
            return self.on_document_click();
        };

        if closest(&element, target, |el| el.id == self.input_id()).is_some() {
            self.toggle();
            return EventResult::Consumed;
        }
        if target == self.prev_id() {
            self.prev();
            return EventResult::Consumed;
        }
        if target == self.next_id() {
            self.next();
            return EventResult::Consumed;
        }

        let day = closest(&element, target, |el| el.has_class(CELL_CLASS))
            .and_then(|cell| cell.data_attr("value"))
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|at| at.with_timezone(&Utc).date_naive());

        match day {
            Some(day) => self.select_day(day),
            None => EventResult::Ignored,
        }
    }

    fn on_document_click(&self) -> EventResult {
        let mut inner = self.write();
        if !inner.open {
            return EventResult::Ignored;
        }
        inner.open = false;
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use domtree::{Viewport, to_html};

    use super::*;
    use crate::locale::Russian;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn picker() -> RangePicker {
        RangePicker::new(PickerConfig::ending(date(2024, 5, 20)))
    }

    fn click(target: &str) -> Event {
        Event::Click {
            target: Some(target.to_string()),
        }
    }

    fn day_id(picker: &RangePicker, day: NaiveDate) -> String {
        format!("{}-day-{day}", picker.id())
    }

    #[test]
    fn test_default_range_is_two_months() {
        let picker = picker();
        let range = picker.selected();
        assert_eq!(range.from.date_naive(), date(2024, 3, 20));
        assert_eq!(range.to.date_naive(), date(2024, 5, 20));
        assert_eq!(picker.shown_month(), date(2024, 3, 1));

        let html = to_html(&picker.element());
        assert!(html.contains("3/20/24"));
        assert!(html.contains("5/20/24"));
    }

    #[test]
    fn test_toggle_renders_two_months() {
        let picker = picker();
        let mut doc = Document::new(Viewport::default());
        picker.render(&mut doc);

        assert!(!picker.element().has_class(OPEN_CLASS));
        picker.handle_event(&doc, &click(&format!("{}-from", picker.id())));
        assert!(picker.is_open());

        let html = to_html(&picker.element());
        assert!(html.contains("rangepicker_open"));
        assert!(html.contains("March"));
        assert!(html.contains("April"));
        assert!(!html.contains("May"));

        picker.handle_event(&doc, &click(&picker.next_id()));
        let html = to_html(&picker.element());
        assert!(html.contains("May"));
        assert!(!html.contains("March"));
    }

    #[test]
    fn test_two_clicks_select_and_swap() {
        let picker = picker();
        let mut doc = Document::new(Viewport::default());
        picker.render(&mut doc);
        picker.toggle();

        let first = picker.handle_event(&doc, &click(&day_id(&picker, date(2024, 4, 10))));
        assert_eq!(first, EventResult::Consumed);
        assert!(picker.is_open());

        let second = picker.handle_event(&doc, &click(&day_id(&picker, date(2024, 3, 5))));
        let expected = DateRange::new(midnight(date(2024, 3, 5)), midnight(date(2024, 4, 10)));
        assert_eq!(second.emitted(), Some(WidgetEvent::DateSelect(expected)));
        assert_eq!(picker.selected(), expected);
        assert!(!picker.is_open());
    }

    #[test]
    fn test_pending_selection_highlight() {
        let picker = picker();
        picker.toggle();
        picker.select_day(date(2024, 3, 25));

        let element = picker.element();
        let from = find_element(&element, &day_id(&picker, date(2024, 3, 25))).unwrap();
        assert!(from.has_class("rangepicker__selected-from"));
        let later = find_element(&element, &day_id(&picker, date(2024, 3, 26))).unwrap();
        assert!(!later.has_class("rangepicker__selected-between"));
    }

    #[test]
    fn test_outside_click_closes() {
        let picker = picker();
        let mut doc = Document::new(Viewport::default());
        picker.render(&mut doc);
        picker.toggle();

        assert_eq!(
            picker.handle_event(&doc, &click("somewhere-else")),
            EventResult::Consumed
        );
        assert!(!picker.is_open());
        assert_eq!(
            picker.handle_event(&doc, &click("somewhere-else")),
            EventResult::Ignored
        );
    }

    #[test]
    fn test_destroy_removes_capture_listener() {
        let picker = picker();
        let mut doc = Document::new(Viewport::default());
        picker.render(&mut doc);
        picker.render(&mut doc);
        assert_eq!(doc.listeners().owned_by(picker.id()), 2);

        assert_eq!(picker.destroy(&mut doc), 2);
        assert!(doc.listeners().is_empty());

        picker.toggle();
        assert_eq!(
            picker.handle_event(&doc, &click("somewhere-else")),
            EventResult::Ignored
        );
        assert!(picker.is_open());
    }

    #[test]
    fn test_russian_locale() {
        let picker = RangePicker::new(
            PickerConfig::ending(date(2024, 5, 20)).locale(Arc::new(Russian)),
        );
        picker.toggle();
        let html = to_html(&picker.element());
        assert!(html.contains("20.03.2024"));
        assert!(html.contains("март"));
    }
}
