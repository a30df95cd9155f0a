//! Order-engine domain logic, independent of oracles, clocks and transports.

pub mod error;
pub mod index;
pub mod money;
pub mod store;
pub mod trigger;

mod id;
mod order;
mod order_type;

// Core domain types
pub use id::OrderId;
pub use order::{NewOrder, Order};
pub use order_type::{Direction, OrderFamily, OrderRole, OrderType, RequestKind};

// Storage
pub use index::IdIndex;
pub use store::OrderStore;

// Evaluation
pub use trigger::{is_triggered, order_triggered, PriceReading};
