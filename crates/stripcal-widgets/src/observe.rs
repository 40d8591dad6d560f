#![forbid(unsafe_code)]

//! Change notification for controller state.
//!
//! Controllers expose a snapshot of their current state through read-only
//! accessors; observers registered here are told *that* something changed
//! and re-read whatever they need. Callbacks run synchronously on the
//! calling (UI) thread during the mutation that triggered them, so they
//! are deliberately `FnMut` and not `Send` - there is no cross-thread
//! delivery to coordinate.

use std::fmt;

/// What aspect of a controller changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    /// The windowed day/month sequence was extended, trimmed, or replaced.
    WindowChanged,
    /// The selected date changed.
    SelectionChanged,
    /// The loading flag toggled.
    LoadingChanged,
}

/// Handle for removing a subscription.
pub type ObserverId = u64;

/// Registry of change observers for one controller instance.
pub struct Observers {
    next_id: ObserverId,
    entries: Vec<(ObserverId, Box<dyn FnMut(CalendarEvent)>)>,
}

impl Observers {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Register a callback for subsequent changes.
    pub fn subscribe(&mut self, callback: impl FnMut(CalendarEvent) + 'static) -> ObserverId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if the id is unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Number of active subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver an event to every observer, in subscription order.
    pub(crate) fn emit(&mut self, event: CalendarEvent) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }
}

impl Default for Observers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
