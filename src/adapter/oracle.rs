//! In-process oracle with a settable smoothed price.
//!
//! Raw samples carry `raw_decimals` fractional digits and are truncated to
//! the oracle's `decimals` by integer division.

use alloy_primitives::U256;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::OracleError;
use crate::port::{OracleSample, PriceOracle};

/// Largest precision gap whose power of ten still fits in a `U256`.
pub const MAX_DECIMAL_GAP: u32 = 77;

/// Oracle whose smoothed round is pushed in by its owner.
#[derive(Debug)]
pub struct FixedOracle {
    decimals: u32,
    raw_decimals: u32,
    divisor: U256,
    max_raw: U256,
    latest: RwLock<Option<OracleSample>>,
}

impl FixedOracle {
    /// Create an oracle with no published round.
    ///
    /// # Errors
    ///
    /// `InvalidPrecision` if `raw_decimals` is below `decimals` or exceeds it
    /// by more than [`MAX_DECIMAL_GAP`].
    pub fn new(decimals: u32, raw_decimals: u32) -> Result<Self, OracleError> {
        let gap = raw_decimals
            .checked_sub(decimals)
            .filter(|gap| *gap <= MAX_DECIMAL_GAP)
            .ok_or(OracleError::InvalidPrecision {
                decimals,
                raw_decimals,
            })?;
        Ok(Self {
            decimals,
            raw_decimals,
            divisor: U256::from(10u64).pow(U256::from(gap)),
            max_raw: U256::MAX,
            latest: RwLock::new(None),
        })
    }

    /// Cap the raw samples this oracle accepts.
    #[must_use]
    pub fn with_max_raw(mut self, max_raw: U256) -> Self {
        self.max_raw = max_raw;
        self
    }

    /// Create an oracle with an initial smoothed value.
    #[must_use]
    pub fn with_price(self, value: U256, timestamp: u64) -> Self {
        self.publish(value, timestamp);
        self
    }

    /// Publish a new smoothed round. Round ids increase by one per publish.
    pub fn publish(&self, value: U256, timestamp: u64) {
        let mut latest = self.latest.write();
        let round_id = latest.map_or(1, |s| s.round_id + 1);
        debug!(value = %value, round_id, timestamp, "Oracle round published");
        *latest = Some(OracleSample {
            value,
            round_id,
            timestamp,
        });
    }

    #[must_use]
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }

    #[must_use]
    pub const fn raw_decimals(&self) -> u32 {
        self.raw_decimals
    }
}

impl PriceOracle for FixedOracle {
    fn latest_sample(&self) -> Result<OracleSample, OracleError> {
        self.latest.read().ok_or_else(|| OracleError::Unavailable {
            reason: "no round published".to_string(),
        })
    }

    fn truncate(&self, raw: U256) -> U256 {
        raw / self.divisor
    }

    fn truncated_max_value(&self) -> U256 {
        self.truncate(self.max_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wad(units: u64, millionths: u64) -> U256 {
        U256::from(units) * U256::from(10u64).pow(U256::from(18))
            + U256::from(millionths) * U256::from(10u64).pow(U256::from(12))
    }

    #[test]
    fn truncates_wad_to_six_decimals() {
        let oracle = FixedOracle::new(6, 18).unwrap();
        assert_eq!(oracle.truncate(wad(98, 500_000)), U256::from(98_500000u64));
    }

    #[test]
    fn truncation_drops_sub_unit_digits() {
        let oracle = FixedOracle::new(6, 18).unwrap();
        let raw = wad(1, 0) + U256::from(999_999_999_999u64);
        assert_eq!(oracle.truncate(raw), U256::from(1_000000u64));
    }

    #[test]
    fn same_precision_is_identity() {
        let oracle = FixedOracle::new(8, 8).unwrap();
        assert_eq!(oracle.truncate(U256::from(12_345u64)), U256::from(12_345u64));
    }

    #[test]
    fn unpublished_oracle_is_unavailable() {
        let oracle = FixedOracle::new(6, 18).unwrap();
        assert!(matches!(
            oracle.latest_sample(),
            Err(OracleError::Unavailable { .. })
        ));
    }

    #[test]
    fn publish_advances_round() {
        let oracle = FixedOracle::new(6, 18).unwrap().with_price(U256::from(1u64), 100);
        oracle.publish(U256::from(2u64), 160);

        let sample = oracle.latest_sample().unwrap();
        assert_eq!(sample.value, U256::from(2u64));
        assert_eq!(sample.round_id, 2);
        assert_eq!(sample.timestamp, 160);
    }

    #[test]
    fn widest_precision_gap_is_accepted() {
        let oracle = FixedOracle::new(0, MAX_DECIMAL_GAP).unwrap();
        let one = U256::from(10u64).pow(U256::from(MAX_DECIMAL_GAP));
        assert_eq!(oracle.truncate(one), U256::from(1u64));
        assert_eq!(oracle.truncate(one - U256::from(1u64)), U256::ZERO);
    }

    #[test]
    fn precision_gap_past_u256_is_rejected() {
        assert_eq!(
            FixedOracle::new(0, MAX_DECIMAL_GAP + 1).unwrap_err(),
            OracleError::InvalidPrecision {
                decimals: 0,
                raw_decimals: 78
            }
        );
        assert!(FixedOracle::new(0, 100).is_err());
    }

    #[test]
    fn raw_precision_below_oracle_precision_is_rejected() {
        assert!(matches!(
            FixedOracle::new(18, 6),
            Err(OracleError::InvalidPrecision { .. })
        ));
    }

    #[test]
    fn max_value_follows_raw_cap() {
        let oracle = FixedOracle::new(6, 18).unwrap().with_max_raw(wad(1_000, 0));
        assert_eq!(oracle.truncated_max_value(), U256::from(1_000_000000u64));
    }
}
