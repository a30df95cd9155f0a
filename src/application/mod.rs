//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the engine's use cases.

pub mod engine;
pub mod settings;

pub use engine::{Fill, Refund, TriggerEngine};
pub use settings::{EngineSettings, DEFAULT_EXPIRATION_PERIOD_SECS};
