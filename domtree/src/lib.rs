//! A small document tree for widgets that render to HTML.
//!
//! Widgets build [`Element`] trees, the host serializes them with
//! [`to_html`], and document-level listeners are tracked per instance in a
//! [`Document`] so teardown can release every registration it made.

pub mod document;
pub mod element;
pub mod event;
pub mod html;
pub mod layout;
pub mod listener;

pub use document::{Document, Viewport};
pub use element::{
    Content, Element, closest, find_element, find_element_mut, query_all, sub_elements,
};
pub use event::{Event, EventKind};
pub use html::{escape_html, to_html};
pub use layout::{LayoutResult, Rect};
pub use listener::{ListenerId, ListenerOptions, Listeners, Registration};
