//! Explicit listener registrations.
//!
//! Every document-level listener a widget installs is recorded here under
//! the widget's owner ID. The widget keeps the returned [`ListenerId`]s and
//! hands them back on teardown, so nothing outlives the instance that
//! registered it.

use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;

use crate::event::EventKind;

/// Handle to a single registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Deliver during the capture phase, before targeted handlers.
    pub capture: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: ListenerId,
    pub kind: EventKind,
    /// Owning widget instance.
    pub owner: String,
    pub options: ListenerOptions,
}

#[derive(Debug, Default)]
pub struct Listeners {
    registrations: Vec<Registration>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        kind: EventKind,
        owner: impl Into<String>,
        options: ListenerOptions,
    ) -> ListenerId {
        let id = ListenerId::new();
        let owner = owner.into();
        trace!("add {kind} listener {id:?} for {owner}");
        self.registrations.push(Registration {
            id,
            kind,
            owner,
            options,
        });
        id
    }

    /// Remove a registration. Returns false if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        before != self.registrations.len()
    }

    pub fn is_listening(&self, owner: &str, kind: EventKind) -> bool {
        self.registrations
            .iter()
            .any(|r| r.owner == owner && r.kind == kind)
    }

    /// Registrations for `kind`, capture-phase ones first.
    pub fn for_kind(&self, kind: EventKind) -> Vec<&Registration> {
        let mut found: Vec<_> = self
            .registrations
            .iter()
            .filter(|r| r.kind == kind)
            .collect();
        found.sort_by_key(|r| !r.options.capture);
        found
    }

    pub fn owned_by(&self, owner: &str) -> usize {
        self.registrations.iter().filter(|r| r.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
