//! Fixed-point amounts and their human-readable decimal form.

use alloy_primitives::U256;
use rust_decimal::Decimal;

/// Largest scale `rust_decimal` can represent.
const MAX_SCALE: u32 = 28;

/// Convert a fixed-point value with `decimals` fractional digits to a `Decimal`.
///
/// Returns `None` if the value does not fit into a `Decimal` mantissa or the
/// scale is too large.
#[must_use]
pub fn to_decimal(value: U256, decimals: u32) -> Option<Decimal> {
    if decimals > MAX_SCALE {
        return None;
    }
    let raw = i128::try_from(value).ok()?;
    Decimal::try_from_i128_with_scale(raw, decimals).ok()
}

/// Render a fixed-point value, falling back to the raw integer when it
/// cannot be expressed as a `Decimal`.
#[must_use]
pub fn format_fixed(value: U256, decimals: u32) -> String {
    match to_decimal(value, decimals) {
        Some(d) => d.normalize().to_string(),
        None => value.to_string(),
    }
}

/// Serde support for amounts written as decimal or `0x` strings, or as
/// plain integers. Serializes as a decimal string.
pub mod amount_serde {
    use std::str::FromStr;

    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
    }

    fn parse<E: serde::de::Error>(raw: Raw) -> Result<U256, E> {
        match raw {
            Raw::Int(v) => Ok(U256::from(v)),
            Raw::Text(s) => U256::from_str(s.trim().replace('_', "").as_str()).map_err(E::custom),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        parse(Raw::deserialize(deserializer)?)
    }

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Same encoding for optional amounts.
    pub mod option {
        use super::{parse, Raw};
        use alloy_primitives::U256;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<U256>, D::Error> {
            Option::<Raw>::deserialize(deserializer)?.map(parse).transpose()
        }

        pub fn serialize<S: Serializer>(
            value: &Option<U256>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.serialize_some(&v.to_string()),
                None => serializer.serialize_none(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn six_decimal_price_to_decimal() {
        let price = U256::from(98_500000u64);
        assert_eq!(to_decimal(price, 6), Some(dec!(98.5)));
    }

    #[test]
    fn oversized_value_falls_back_to_integer() {
        assert_eq!(format_fixed(U256::MAX, 6), U256::MAX.to_string());
        assert_eq!(format_fixed(U256::from(1_500u64), 3), "1.5");
    }

    #[derive(serde::Deserialize)]
    struct Holder {
        #[serde(with = "amount_serde")]
        amount: U256,
        #[serde(default, with = "amount_serde::option")]
        cap: Option<U256>,
    }

    #[test]
    fn amounts_accept_integers_and_strings() {
        let h: Holder = serde_json::from_str(r#"{"amount": 5, "cap": "0x10"}"#).unwrap();
        assert_eq!(h.amount, U256::from(5u64));
        assert_eq!(h.cap, Some(U256::from(16u64)));

        let h: Holder = serde_json::from_str(r#"{"amount": "100_000000"}"#).unwrap();
        assert_eq!(h.amount, U256::from(100_000000u64));
        assert_eq!(h.cap, None);
    }

    #[test]
    fn malformed_amount_is_an_error() {
        assert!(serde_json::from_str::<Holder>(r#"{"amount": "ten"}"#).is_err());
    }

    #[test]
    fn scale_above_limit_is_rejected() {
        assert_eq!(to_decimal(U256::from(1u64), 29), None);
    }
}
