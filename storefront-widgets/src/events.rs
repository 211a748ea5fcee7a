//! Widget event handling types.
//!
//! Widgets handle document events themselves and report back through
//! [`EventResult`]. Events a widget emits for its host page (the slider's
//! `range-select`, the picker's `date-select`) ride along as
//! [`EventResult::Emit`].

use storefront_api::query::DateRange;

/// Events widgets emit for the page that hosts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// `range-select`: the slider settled on a new range.
    RangeSelect { from: i64, to: i64 },
    /// `date-select`: the picker completed a date range.
    DateSelect(DateRange),
}

impl WidgetEvent {
    /// DOM event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RangeSelect { .. } => "range-select",
            Self::DateSelect(_) => "date-select",
        }
    }
}

/// Result of handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
    /// Event started a drag operation on this widget.
    StartDrag,
    /// Event was consumed and the widget emitted an event for its host.
    Emit(WidgetEvent),
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }

    /// The emitted widget event, if any.
    pub fn emitted(&self) -> Option<WidgetEvent> {
        match self {
            Self::Emit(event) => Some(*event),
            _ => None,
        }
    }
}
