//! The document a page is mounted in.

use crate::event::EventKind;
use crate::layout::{LayoutResult, Rect};
use crate::listener::{ListenerId, ListenerOptions, Listeners};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Host state shared by every widget on a page: measured layout, viewport
/// size and document-level listener registrations.
#[derive(Debug, Default)]
pub struct Document {
    pub layout: LayoutResult,
    pub viewport: Viewport,
    listeners: Listeners,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Bounding client rect of an element, if the host measured it.
    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.layout.get(id)
    }

    pub fn add_listener(&mut self, kind: EventKind, owner: &str) -> ListenerId {
        self.listeners.add(kind, owner, ListenerOptions::default())
    }

    pub fn add_capture_listener(&mut self, kind: EventKind, owner: &str) -> ListenerId {
        self.listeners.add(kind, owner, ListenerOptions::capture())
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn is_listening(&self, owner: &str, kind: EventKind) -> bool {
        self.listeners.is_listening(owner, kind)
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}
