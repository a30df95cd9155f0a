//! Tripwire - conditional order trigger engine.
//!
//! Stores "if price condition, then fire" orders on behalf of users of a
//! leveraged-derivatives protocol and evaluates them against a smoothed
//! oracle price and a caller-supplied instantaneous sample. Firing removes
//! the order and yields a downstream request for the execution system.
//!
//! # Architecture
//!
//! - [`domain`] - Order types, the order entity, the live-order store and
//!   the trigger predicate
//! - [`port`] - Oracle, routing, clock and notifier seams
//! - [`adapter`] - In-process implementations of the ports
//! - [`application`] - [`TriggerEngine`](application::TriggerEngine), the
//!   order lifecycle
//! - [`infrastructure`] - Configuration and wiring
//! - [`cli`] - The `tripwire` command line
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use alloy_primitives::{address, Bytes, U256};
//! use tripwire::adapter::{FixedOracle, ManualClock, StaticRouter};
//! use tripwire::application::{EngineSettings, TriggerEngine};
//! use tripwire::domain::{NewOrder, OrderFamily, OrderId, OrderType, RequestKind};
//! use tripwire::port::NullNotifier;
//!
//! let admin = address!("0101010101010101010101010101010101010101");
//! let keeper = address!("0202020202020202020202020202020202020202");
//! let alice = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
//!
//! let oracle = Arc::new(FixedOracle::new(6, 6)?.with_price(U256::from(99_000000u64), 0));
//! let router = StaticRouter::new().with_route(OrderFamily::Perpetual, oracle);
//! let engine = TriggerEngine::new(
//!     EngineSettings::new(admin, keeper),
//!     Arc::new(router),
//!     Arc::new(NullNotifier),
//!     Arc::new(ManualClock::new(0)),
//! )?;
//!
//! engine.create_order(
//!     keeper,
//!     NewOrder {
//!         order_type: OrderType::PerpetualLimit,
//!         id: OrderId::from(1u64),
//!         owner: alice,
//!         execution_fee: U256::from(5u64),
//!         threshold: U256::from(100_000000u64),
//!         payload: Bytes::new(),
//!     },
//! )?;
//!
//! let fill = engine.trigger_order(keeper, OrderId::from(1u64), U256::from(98_500000u64))?;
//! assert_eq!(fill.kind, RequestKind::OpenPosition);
//! assert_eq!(engine.order_count(), 0);
//! # Ok::<(), tripwire::error::Error>(())
//! ```
//!
//! # Features
//!
//! - `testkit` - Builders, a recording notifier and a ready-made engine
//!   fixture for integration tests

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
