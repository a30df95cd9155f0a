//! The conditional order entity.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use super::{OrderFamily, OrderId, OrderType};

/// A pending "if price condition, then fire" instruction.
///
/// An order is only ever stored with a non-zero owner; a zero owner is the
/// "no order" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    order_type: OrderType,
    owner: Address,
    #[serde(with = "crate::domain::money::amount_serde")]
    execution_fee: U256,
    #[serde(with = "crate::domain::money::amount_serde")]
    threshold: U256,
    payload: Bytes,
    created_at: u64,
}

impl Order {
    /// Create an order from a request stamped with its creation time.
    #[must_use]
    pub fn new(request: NewOrder, created_at: u64) -> Self {
        Self {
            id: request.id,
            order_type: request.order_type,
            owner: request.owner,
            execution_fee: request.execution_fee,
            threshold: request.threshold,
            payload: request.payload,
            created_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    #[must_use]
    pub const fn family(&self) -> OrderFamily {
        self.order_type.family()
    }

    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    #[must_use]
    pub const fn execution_fee(&self) -> U256 {
        self.execution_fee
    }

    #[must_use]
    pub const fn threshold(&self) -> U256 {
        self.threshold
    }

    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Unix timestamp (seconds) of creation. Edits do not reset it.
    #[must_use]
    pub const fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Returns true if `acting_owner` owns this order.
    #[must_use]
    pub fn is_owned_by(&self, acting_owner: Address) -> bool {
        self.owner == acting_owner
    }

    /// Returns true once `period` seconds have elapsed since creation.
    #[must_use]
    pub const fn is_expired(&self, now: u64, period: u64) -> bool {
        now.saturating_sub(self.created_at) >= period
    }

    /// Timestamp at which the order becomes removable as expired.
    #[must_use]
    pub const fn expires_at(&self, period: u64) -> u64 {
        self.created_at.saturating_add(period)
    }

    /// Replace the trigger threshold and payload.
    pub fn amend(&mut self, threshold: U256, payload: Bytes) {
        self.threshold = threshold;
        self.payload = payload;
    }
}

/// Parameters for creating an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_type: OrderType,
    pub id: OrderId,
    pub owner: Address,
    #[serde(with = "crate::domain::money::amount_serde")]
    pub execution_fee: U256,
    #[serde(with = "crate::domain::money::amount_serde")]
    pub threshold: U256,
    #[serde(default)]
    pub payload: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn make_order(created_at: u64) -> Order {
        Order::new(
            NewOrder {
                order_type: OrderType::LongStopLoss,
                id: OrderId::from(7u64),
                owner: address!("00000000000000000000000000000000000000aa"),
                execution_fee: U256::from(5),
                threshold: U256::from(1_000),
                payload: Bytes::from_static(b"abc"),
            },
            created_at,
        )
    }

    #[test]
    fn amend_keeps_creation_time() {
        let mut order = make_order(100);
        order.amend(U256::from(2_000), Bytes::from_static(b"xyz"));

        assert_eq!(order.threshold(), U256::from(2_000));
        assert_eq!(order.payload().as_ref(), b"xyz");
        assert_eq!(order.created_at(), 100);
    }

    #[test]
    fn expiry_is_inclusive_at_period() {
        let order = make_order(1_000);
        assert!(!order.is_expired(1_059, 60));
        assert!(order.is_expired(1_060, 60));
        assert_eq!(order.expires_at(60), 1_060);
    }

    #[test]
    fn clock_behind_creation_is_not_expired() {
        let order = make_order(1_000);
        assert!(!order.is_expired(10, 60));
    }
}
