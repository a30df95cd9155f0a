//! Per-family oracle configuration.

use alloy_primitives::U256;
use serde::Deserialize;

use crate::domain::OrderFamily;

pub use crate::adapter::oracle::MAX_DECIMAL_GAP;

/// One `[[oracles]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OracleConfig {
    /// Family this oracle prices.
    pub family: OrderFamily,
    /// Fractional digits of the oracle's domain.
    pub decimals: u32,
    /// Fractional digits of raw samples handed to the engine.
    #[serde(default = "default_raw_decimals")]
    pub raw_decimals: u32,
    /// Initial smoothed value, in the oracle's domain.
    #[serde(default, with = "crate::domain::money::amount_serde::option")]
    pub smoothed: Option<U256>,
    /// Largest raw sample accepted.
    #[serde(default, with = "crate::domain::money::amount_serde::option")]
    pub max_sample: Option<U256>,
}

fn default_raw_decimals() -> u32 {
    18
}
