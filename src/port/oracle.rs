//! Price oracle port.
//!
//! An oracle publishes a smoothed (time-weighted) price and knows how to
//! bring a caller-supplied raw sample into its own fixed-point domain.

use alloy_primitives::U256;
use serde::Serialize;

use crate::error::OracleError;

/// Latest published round of an oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OracleSample {
    /// Smoothed value in the oracle's fixed-point domain.
    #[serde(with = "crate::domain::money::amount_serde")]
    pub value: U256,
    /// Round identifier.
    pub round_id: u64,
    /// Unix timestamp (seconds) the round was published.
    pub timestamp: u64,
}

/// Source of price readings for one order family.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Calls happen while the engine holds its state lock, so they should be
///   fast and must not call back into the engine
pub trait PriceOracle: Send + Sync {
    /// Latest smoothed round.
    fn latest_sample(&self) -> Result<OracleSample, OracleError>;

    /// Truncate a raw sample into the oracle's fixed-point domain.
    fn truncate(&self, raw: U256) -> U256;

    /// Largest value representable in the oracle's domain.
    fn truncated_max_value(&self) -> U256;
}
