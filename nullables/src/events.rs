//! Nullable event sink — records emitted events for assertions.

use std::sync::Mutex;
use vesta_trust::{EventSink, TrustEvent};

/// An event sink that records everything it receives.
pub struct NullSink {
    events: Mutex<Vec<TrustEvent>>,
}

impl NullSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// All events emitted so far, in order.
    pub fn events(&self) -> Vec<TrustEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of events emitted so far.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for NullSink {
    fn emit(&self, event: &TrustEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
