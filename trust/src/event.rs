//! Events emitted after committed trust transitions.

use vesta_types::{AccountAddress, TrustId};

/// Trust lifecycle events that observers can subscribe to.
///
/// Informational only — emission happens strictly after the state commit
/// and never gates engine logic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrustEvent {
    /// A trust was created.
    Created {
        id: TrustId,
        settlor: AccountAddress,
        beneficiary: AccountAddress,
    },
    /// A deposit installment was completed.
    Deposited { id: TrustId },
    /// A withdrawal installment was completed.
    Withdrawn { id: TrustId },
    /// The trust was revoked and its balance returned to the settlor.
    Revoked { id: TrustId },
}

/// Receives events from the engine.
pub trait EventSink {
    fn emit(&self, event: &TrustEvent);
}

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the emitting thread; keep handlers fast
/// to avoid stalling the operation that emitted.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&TrustEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TrustEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: &TrustEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
