//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the trigger engine and the systems it
//! collaborates with.
//!
//! ```text
//!   ┌─────────────┐      ┌──────────────────────┐      ┌───────────┐
//!   │ OracleRouter├─────►│    TriggerEngine     ├─────►│ Notifier  │
//!   │ PriceOracle │      │ (domain + settings)  │      │  Adapter  │
//!   └─────────────┘      └──────────┬───────────┘      └───────────┘
//!                                   │
//!                               ┌───▼───┐
//!                               │ Clock │
//!                               └───────┘
//! ```
//!
//! # Available Ports
//!
//! - [`PriceOracle`], [`OracleRouter`] - Price readings per order family
//! - [`Clock`] - Current time for creation stamps and expiry
//! - [`Notifier`] - Lifecycle events (logging, downstream consumers)

mod clock;
mod notifier;
mod oracle;
mod router;

pub use clock::Clock;
pub use notifier::{
    ClosedEvent, Event, LogNotifier, Notifier, NotifierRegistry, NullNotifier, OrderEvent,
};
pub use oracle::{OracleSample, PriceOracle};
pub use router::OracleRouter;
