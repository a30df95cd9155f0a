//! Builders for domain primitives used across tests.
//!
//! Prices use six fractional digits (the usual oracle precision) and raw
//! samples use eighteen.

use alloy_primitives::{address, Address, Bytes, U256};

use crate::domain::{NewOrder, OrderId, OrderType};

/// Settings administrator.
pub const ADMIN: Address = address!("0101010101010101010101010101010101010101");
/// Trusted caller.
pub const KEEPER: Address = address!("0202020202020202020202020202020202020202");
pub const ALICE: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const BOB: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

/// Oracle-domain price: `units + millionths / 1e6`.
pub fn price(units: u64, millionths: u64) -> U256 {
    U256::from(units) * U256::from(1_000000u64) + U256::from(millionths)
}

/// 18-decimal raw sample for the same value as [`price`].
pub fn sample(units: u64, millionths: u64) -> U256 {
    price(units, millionths) * U256::from(1_000_000_000_000u64)
}

/// Create an [`OrderId`] from an integer.
pub fn id(n: u64) -> OrderId {
    OrderId::from(n)
}

/// Fluent builder for [`NewOrder`] with test defaults: owner [`ALICE`],
/// fee 5, empty payload.
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    request: NewOrder,
}

impl OrderBuilder {
    pub fn new(id: u64, order_type: OrderType, threshold: U256) -> Self {
        Self {
            request: NewOrder {
                order_type,
                id: OrderId::from(id),
                owner: ALICE,
                execution_fee: U256::from(5u64),
                threshold,
                payload: Bytes::new(),
            },
        }
    }

    pub fn owner(mut self, owner: Address) -> Self {
        self.request.owner = owner;
        self
    }

    pub fn fee(mut self, fee: u64) -> Self {
        self.request.execution_fee = U256::from(fee);
        self
    }

    pub fn payload(mut self, payload: &'static [u8]) -> Self {
        self.request.payload = Bytes::from_static(payload);
        self
    }

    pub fn build(self) -> NewOrder {
        self.request
    }
}

/// Shorthand for [`OrderBuilder::new`].
pub fn order(id: u64, order_type: OrderType, threshold: U256) -> OrderBuilder {
    OrderBuilder::new(id, order_type, threshold)
}
