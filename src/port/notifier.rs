//! Notifier port for order lifecycle events.
//!
//! The engine emits one event per successful state transition. Delivery is
//! fire-and-forget: notifiers cannot fail or veto a transition.

use std::collections::HashMap;

use alloy_primitives::{Address, Bytes, U256};
use serde::Serialize;

use crate::domain::money::format_fixed;
use crate::domain::{Order, OrderFamily, OrderId, OrderType};

/// Lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Order created.
    Created(OrderEvent),
    /// Order threshold or payload changed.
    Edited(OrderEvent),
    /// Order fired and was removed.
    Triggered(ClosedEvent),
    /// Order canceled by its owner and removed.
    Canceled(ClosedEvent),
    /// Order removed after its expiration period elapsed.
    Expired(ClosedEvent),
}

impl Event {
    /// Id of the order the event refers to.
    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        match self {
            Event::Created(e) | Event::Edited(e) => e.id,
            Event::Triggered(e) | Event::Canceled(e) | Event::Expired(e) => e.id,
        }
    }

    /// Time of the transition.
    #[must_use]
    pub const fn time(&self) -> u64 {
        match self {
            Event::Created(e) | Event::Edited(e) => e.time,
            Event::Triggered(e) | Event::Canceled(e) | Event::Expired(e) => e.time,
        }
    }

    /// Stable event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Event::Created(_) => "created",
            Event::Edited(_) => "edited",
            Event::Triggered(_) => "triggered",
            Event::Canceled(_) => "canceled",
            Event::Expired(_) => "expired",
        }
    }
}

/// Full order snapshot carried by create and edit events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderEvent {
    pub order_type: OrderType,
    pub id: OrderId,
    pub owner: Address,
    #[serde(with = "crate::domain::money::amount_serde")]
    pub execution_fee: U256,
    #[serde(with = "crate::domain::money::amount_serde")]
    pub threshold: U256,
    pub payload: Bytes,
    /// Unix timestamp (seconds) of the transition.
    pub time: u64,
}

impl OrderEvent {
    #[must_use]
    pub fn new(order: &Order, time: u64) -> Self {
        Self {
            order_type: order.order_type(),
            id: order.id(),
            owner: order.owner(),
            execution_fee: order.execution_fee(),
            threshold: order.threshold(),
            payload: order.payload().clone(),
            time,
        }
    }
}

/// Removal event carried by trigger, cancel and expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosedEvent {
    pub order_type: OrderType,
    pub id: OrderId,
    pub owner: Address,
    /// Unix timestamp (seconds) of the transition.
    pub time: u64,
}

impl ClosedEvent {
    #[must_use]
    pub fn new(order: &Order, time: u64) -> Self {
        Self {
            order_type: order.order_type(),
            id: order.id(),
            owner: order.owner(),
            time,
        }
    }
}

/// Trait for notification handlers.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The `notify` method should return quickly
/// - Events are delivered after the engine releases its state lock, so
///   concurrent calls may deliver events for the same order out of order
///   (a `triggered` can arrive before its `created`). Consumers that need
///   per-order ordering should sort on [`Event::time`] and apply
///   terminal events last.
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
///
/// Thresholds are rendered as decimals for families whose oracle precision
/// is known, and as raw integers otherwise.
#[derive(Debug, Default)]
pub struct LogNotifier {
    decimals: HashMap<OrderFamily, u32>,
}

impl LogNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `decimals` fractional digits when rendering `family` thresholds.
    #[must_use]
    pub fn with_decimals(mut self, family: OrderFamily, decimals: u32) -> Self {
        self.decimals.insert(family, decimals);
        self
    }

    fn render_threshold(&self, order_type: OrderType, threshold: U256) -> String {
        match self.decimals.get(&order_type.family()) {
            Some(decimals) => format_fixed(threshold, *decimals),
            None => threshold.to_string(),
        }
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::info;
        match event {
            Event::Created(e) => {
                info!(
                    id = %e.id,
                    order_type = %e.order_type,
                    owner = %e.owner,
                    fee = %e.execution_fee,
                    threshold = %self.render_threshold(e.order_type, e.threshold),
                    time = e.time,
                    "Order created"
                );
            }
            Event::Edited(e) => {
                info!(
                    id = %e.id,
                    order_type = %e.order_type,
                    owner = %e.owner,
                    threshold = %self.render_threshold(e.order_type, e.threshold),
                    time = e.time,
                    "Order edited"
                );
            }
            Event::Triggered(e) => {
                info!(id = %e.id, order_type = %e.order_type, owner = %e.owner, time = e.time, "Order triggered");
            }
            Event::Canceled(e) => {
                info!(id = %e.id, order_type = %e.order_type, owner = %e.owner, time = e.time, "Order canceled");
            }
            Event::Expired(e) => {
                info!(id = %e.id, order_type = %e.order_type, owner = %e.owner, time = e.time, "Order expired");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewOrder;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingNotifier {
        count: Arc<AtomicUsize>,
    }

    impl Notifier for CountingNotifier {
        fn notify(&self, _event: Event) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn make_event() -> Event {
        let order = Order::new(
            NewOrder {
                order_type: OrderType::ShortLimit,
                id: OrderId::from(3u64),
                owner: Address::repeat_byte(0xaa),
                execution_fee: U256::from(5),
                threshold: U256::from(100_000000u64),
                payload: Bytes::new(),
            },
            10,
        );
        Event::Canceled(ClosedEvent::new(&order, 20))
    }

    #[test]
    fn test_registry_notify_all() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut registry = NotifierRegistry::new();

        registry.register(Box::new(CountingNotifier {
            count: count.clone(),
        }));
        registry.register(Box::new(CountingNotifier {
            count: count.clone(),
        }));

        registry.notify(make_event());

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_null_notifier() {
        let notifier = NullNotifier;
        notifier.notify(make_event());
    }

    #[test]
    fn test_registry_len_and_is_empty() {
        let mut registry = NotifierRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);

        registry.register(Box::new(NullNotifier));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_event_accessors() {
        let event = make_event();
        assert_eq!(event.order_id(), OrderId::from(3u64));
        assert_eq!(event.name(), "canceled");
    }

    #[test]
    fn test_log_notifier_renders_known_family_as_decimal() {
        let notifier = LogNotifier::new().with_decimals(OrderFamily::LeveragedShort, 6);
        assert_eq!(
            notifier.render_threshold(OrderType::ShortLimit, U256::from(100_500000u64)),
            "100.5"
        );
        assert_eq!(
            notifier.render_threshold(OrderType::LongLimit, U256::from(100_500000u64)),
            "100500000"
        );
    }
}
