//! Trigger evaluation.
//!
//! Decides whether an order's price condition holds for a pair of readings
//! taken from the oracle that prices its family:
//!
//! | Role          | Standard family        | Inverted family        |
//! |---------------|------------------------|------------------------|
//! | limit-entry   | `max(s, i) <= t`       | `min(s, i) >= t`       |
//! | take-profit   | `min(s, i) >= t`       | `max(s, i) <= t`       |
//! | stop-loss     | `min(s, i) <= t`       | `max(s, i) >= t`       |
//!
//! `s` is the smoothed (time-weighted) reading, `i` the instantaneous
//! reading and `t` the order threshold. All comparisons are inclusive.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::order_type::{Direction, OrderRole, OrderType};
use super::Order;

/// Two readings of the same price in the oracle's fixed-point domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceReading {
    /// Oracle's latest time-weighted value.
    pub smoothed: U256,
    /// Caller-supplied raw sample truncated into the oracle's domain.
    pub instantaneous: U256,
}

impl PriceReading {
    #[must_use]
    pub const fn new(smoothed: U256, instantaneous: U256) -> Self {
        Self {
            smoothed,
            instantaneous,
        }
    }

    /// The higher of the two readings.
    #[must_use]
    pub fn high(&self) -> U256 {
        self.smoothed.max(self.instantaneous)
    }

    /// The lower of the two readings.
    #[must_use]
    pub fn low(&self) -> U256 {
        self.smoothed.min(self.instantaneous)
    }
}

/// Returns true if an order of `order_type` with `threshold` fires at `reading`.
#[must_use]
pub fn is_triggered(reading: &PriceReading, order_type: OrderType, threshold: U256) -> bool {
    match (order_type.family().direction(), order_type.role()) {
        (Direction::Standard, OrderRole::LimitEntry)
        | (Direction::Inverted, OrderRole::TakeProfit) => reading.high() <= threshold,
        (Direction::Standard, OrderRole::StopLoss) => reading.low() <= threshold,
        (Direction::Standard, OrderRole::TakeProfit)
        | (Direction::Inverted, OrderRole::LimitEntry) => reading.low() >= threshold,
        (Direction::Inverted, OrderRole::StopLoss) => reading.high() >= threshold,
    }
}

/// Returns true if `order` fires at `reading`.
#[must_use]
pub fn order_triggered(reading: &PriceReading, order: &Order) -> bool {
    is_triggered(reading, order.order_type(), order.threshold())
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: u64 = 100_000000;

    fn reading(smoothed: u64, instantaneous: u64) -> PriceReading {
        PriceReading::new(U256::from(smoothed), U256::from(instantaneous))
    }

    fn fires(order_type: OrderType, smoothed: u64, instantaneous: u64) -> bool {
        is_triggered(
            &reading(smoothed, instantaneous),
            order_type,
            U256::from(THRESHOLD),
        )
    }

    /// Readings that straddle the threshold: (smoothed, instantaneous).
    const BELOW_BOTH: (u64, u64) = (THRESHOLD - 2, THRESHOLD - 1);
    const AT_BOTH: (u64, u64) = (THRESHOLD, THRESHOLD);
    const ABOVE_BOTH: (u64, u64) = (THRESHOLD + 1, THRESHOLD + 2);
    const SPLIT_LOW_SMOOTHED: (u64, u64) = (THRESHOLD - 1, THRESHOLD + 1);
    const SPLIT_HIGH_SMOOTHED: (u64, u64) = (THRESHOLD + 1, THRESHOLD - 1);
    const LOW_AT: (u64, u64) = (THRESHOLD, THRESHOLD + 1);
    const HIGH_AT: (u64, u64) = (THRESHOLD - 1, THRESHOLD);

    /// The expectation arrays below are indexed in this order.
    const CASES: [(u64, u64); 7] = [
        BELOW_BOTH,
        AT_BOTH,
        ABOVE_BOTH,
        SPLIT_LOW_SMOOTHED,
        SPLIT_HIGH_SMOOTHED,
        LOW_AT,
        HIGH_AT,
    ];

    // max <= t
    const FALLS_CONSERVATIVE: [bool; 7] = [true, true, false, false, false, false, true];
    // min <= t
    const FALLS_EAGER: [bool; 7] = [true, true, false, true, true, true, true];
    // min >= t
    const RISES_CONSERVATIVE: [bool; 7] = [false, true, true, false, false, true, false];
    // max >= t
    const RISES_EAGER: [bool; 7] = [false, true, true, true, true, true, true];

    fn expected(order_type: OrderType) -> [bool; 7] {
        match order_type {
            OrderType::PerpetualLimit | OrderType::LongLimit => FALLS_CONSERVATIVE,
            OrderType::PerpetualStopLoss | OrderType::LongStopLoss => FALLS_EAGER,
            OrderType::PerpetualTakeProfit | OrderType::LongTakeProfit => RISES_CONSERVATIVE,
            OrderType::ShortLimit => RISES_CONSERVATIVE,
            OrderType::ShortTakeProfit => FALLS_CONSERVATIVE,
            OrderType::ShortStopLoss => RISES_EAGER,
        }
    }

    #[test]
    fn decision_table_for_every_order_type() {
        for order_type in OrderType::ALL {
            let want = expected(order_type);
            for (case, (smoothed, instantaneous)) in CASES.iter().enumerate() {
                assert_eq!(
                    fires(order_type, *smoothed, *instantaneous),
                    want[case],
                    "{order_type} at smoothed={smoothed} instantaneous={instantaneous}"
                );
            }
        }
    }

    #[test]
    fn equality_fires_for_all_types() {
        for order_type in OrderType::ALL {
            assert!(fires(order_type, THRESHOLD, THRESHOLD), "{order_type}");
        }
    }

    #[test]
    fn limit_entry_ignores_transient_dip() {
        // Instantaneous dips below but smoothed stays above: no fill yet.
        assert!(!fires(OrderType::PerpetualLimit, 101_000000, 99_000000));
        assert!(fires(OrderType::PerpetualLimit, 99_000000, 98_500000));
    }

    #[test]
    fn short_stop_loss_fires_on_either_reading_rising() {
        assert!(fires(OrderType::ShortStopLoss, 99_000000, 100_000001));
        assert!(fires(OrderType::ShortStopLoss, 100_000001, 99_000000));
        assert!(!fires(OrderType::ShortStopLoss, 99_000000, 99_999999));
    }

    #[test]
    fn reading_high_and_low() {
        let r = reading(5, 3);
        assert_eq!(r.high(), U256::from(5));
        assert_eq!(r.low(), U256::from(3));
    }
}
