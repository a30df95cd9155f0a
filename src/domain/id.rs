//! Domain identifier types with proper encapsulation.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Unique identifier for a conditional order.
///
/// Order ids are caller-supplied 256-bit values. The inner value is private
/// to ensure all construction goes through the defined constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(#[serde(with = "crate::domain::money::amount_serde")] U256);

impl OrderId {
    /// Create a new `OrderId` from a 256-bit value.
    #[must_use]
    pub const fn new(id: U256) -> Self {
        Self(id)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<U256> for OrderId {
    fn from(id: U256) -> Self {
        Self::new(id)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self::new(U256::from(id))
    }
}

impl FromStr for OrderId {
    type Err = alloy_primitives::ruint::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        U256::from_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_from_u64_and_str_agree() {
        let a = OrderId::from(42u64);
        let b: OrderId = "42".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "42");
    }

    #[test]
    fn order_id_serializes_as_decimal_string() {
        let id = OrderId::from(7u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""7""#);
        assert_eq!(serde_json::from_str::<OrderId>("7").unwrap(), id);
    }

    #[test]
    fn order_id_parses_hex() {
        let id: OrderId = "0x2a".parse().unwrap();
        assert_eq!(id, OrderId::from(42u64));
    }
}
