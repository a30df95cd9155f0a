//! Event-capturing notifier.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::OrderId;
use crate::port::{Event, Notifier};

/// Thread-safe event collector for notification assertions in tests.
///
/// Clones share the same buffer, so one clone can be handed to the engine
/// while the test keeps another.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Snapshot of all events so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Event names in delivery order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(Event::name).collect()
    }

    /// Events for one order, in delivery order.
    pub fn for_order(&self, id: OrderId) -> Vec<Event> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.order_id() == id)
            .cloned()
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events.lock().push(event);
    }
}
