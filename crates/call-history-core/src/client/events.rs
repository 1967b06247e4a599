//! Event bridge between the underlying session channels and the public API
//!
//! At construction the bridge walks [`CHANNEL_ROUTES`] once and registers one
//! forwarding callback per underlying channel with the event source
//! collaborator, in the table's fixed order. Each incoming notification is
//! re-published verbatim under the public identifier its channel maps to.
//!
//! There is no buffering, no coalescing, and no deduplication between the
//! inclusive and legacy channels; both may fire for related events and
//! listeners receive each delivery independently.

use std::sync::Arc;

use dashmap::DashMap;

use crate::client::transport::SessionEventSource;
use crate::events::{
    CallHistoryEventKind, SessionEvent, SessionEventListener, CHANNEL_ROUTES,
};

/// Routes underlying notifications to registered public listeners
///
/// Listener registration is append-only for the lifetime of the client.
/// Delivery clones a snapshot of the listener list before invoking anything,
/// so no registry lock is held across user callbacks.
pub(crate) struct EventBridge {
    listeners: Arc<DashMap<CallHistoryEventKind, Vec<SessionEventListener>>>,
}

impl EventBridge {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
        }
    }

    /// Register the forwarding callbacks with the event source
    ///
    /// Called exactly once per client instance, at construction.
    pub(crate) fn subscribe(&self, source: &dyn SessionEventSource) {
        for (channel, kind) in CHANNEL_ROUTES {
            let listeners = Arc::clone(&self.listeners);
            source.on(
                channel,
                Box::new(move |event| {
                    tracing::debug!(
                        channel = %channel,
                        kind = %kind,
                        tracking_id = %event.tracking_id,
                        "forwarding session event"
                    );
                    deliver(&listeners, kind, &event);
                }),
            );
        }
    }

    /// Append a listener for a public event kind
    pub(crate) fn on(&self, kind: CallHistoryEventKind, listener: SessionEventListener) {
        self.listeners.entry(kind).or_default().push(listener);
    }
}

/// Invoke every listener registered for `kind`, in registration order
fn deliver(
    listeners: &DashMap<CallHistoryEventKind, Vec<SessionEventListener>>,
    kind: CallHistoryEventKind,
    event: &SessionEvent,
) {
    let snapshot: Vec<SessionEventListener> = match listeners.get(&kind) {
        Some(registered) => registered.clone(),
        None => return,
    };
    for listener in snapshot {
        listener(event);
    }
}
