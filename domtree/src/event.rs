/// Document events with element targeting.
///
/// Coordinates are client (viewport) coordinates, as reported by a browser.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Click, targeted at the innermost element under the pointer
    Click { target: Option<String> },
    /// Pointer pressed
    PointerDown {
        target: Option<String>,
        client_x: f64,
        client_y: f64,
    },
    /// Pointer moved (delivered to document listeners)
    PointerMove { client_x: f64, client_y: f64 },
    /// Pointer released (delivered to document listeners)
    PointerUp { client_x: f64, client_y: f64 },
    /// Document scrolled
    Scroll,
    /// Value of a form control changed
    Input { target: String, value: String },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerUp { .. } => EventKind::PointerUp,
            Self::Scroll => EventKind::Scroll,
            Self::Input { .. } => EventKind::Input,
        }
    }

    /// The targeted element, for events that have one.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Click { target } | Self::PointerDown { target, .. } => target.as_deref(),
            Self::Input { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn client_x(&self) -> Option<f64> {
        match self {
            Self::PointerDown { client_x, .. }
            | Self::PointerMove { client_x, .. }
            | Self::PointerUp { client_x, .. } => Some(*client_x),
            _ => None,
        }
    }
}

/// Event discriminant used for listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    PointerDown,
    PointerMove,
    PointerUp,
    Scroll,
    Input,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Click => "click",
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::Scroll => "scroll",
            Self::Input => "input",
        };
        f.write_str(name)
    }
}
