//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Well-known identities, price helpers and order builders.
//! - [`notifier`] - [`RecordingNotifier`](notifier::RecordingNotifier) for
//!   event assertions.
//! - [`engine`] - A ready-made engine wired to settable oracles and a
//!   manual clock.

pub mod domain;
pub mod engine;
pub mod notifier;
