//! Order types, families, roles and the downstream request kinds they map to.
//!
//! The nine live order types form a closed set: three instrument families,
//! each with a limit-entry, take-profit and stop-loss role. Everything that
//! depends on the variant (routing, evaluation, downstream mapping) matches
//! on these enums exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Instrument family an order is priced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderFamily {
    /// Perpetual positions.
    Perpetual,
    /// Leveraged long tokens.
    LeveragedLong,
    /// Leveraged short tokens. Payoff is inverse to the underlying.
    LeveragedShort,
}

impl OrderFamily {
    /// All families, in wire order.
    pub const ALL: [OrderFamily; 3] = [
        OrderFamily::Perpetual,
        OrderFamily::LeveragedLong,
        OrderFamily::LeveragedShort,
    ];

    /// Comparison direction used by this family.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Perpetual | Self::LeveragedLong => Direction::Standard,
            Self::LeveragedShort => Direction::Inverted,
        }
    }

    /// Stable name used in config files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perpetual => "perpetual",
            Self::LeveragedLong => "leveraged_long",
            Self::LeveragedShort => "leveraged_short",
        }
    }
}

impl fmt::Display for OrderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a family's entry/exit roles compare in the standard or inverted direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Standard,
    Inverted,
}

/// Purpose of an order within its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderRole {
    LimitEntry,
    TakeProfit,
    StopLoss,
}

impl fmt::Display for OrderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LimitEntry => "limit_entry",
            Self::TakeProfit => "take_profit",
            Self::StopLoss => "stop_loss",
        };
        f.write_str(name)
    }
}

/// One of the nine live order variants.
///
/// The "none" sentinel (wire code `0`) is not representable; it is rejected
/// when converting from a raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    PerpetualLimit,
    PerpetualTakeProfit,
    PerpetualStopLoss,
    LongLimit,
    LongTakeProfit,
    LongStopLoss,
    ShortLimit,
    ShortTakeProfit,
    ShortStopLoss,
}

impl OrderType {
    /// All live order types, in wire order.
    pub const ALL: [OrderType; 9] = [
        OrderType::PerpetualLimit,
        OrderType::PerpetualTakeProfit,
        OrderType::PerpetualStopLoss,
        OrderType::LongLimit,
        OrderType::LongTakeProfit,
        OrderType::LongStopLoss,
        OrderType::ShortLimit,
        OrderType::ShortTakeProfit,
        OrderType::ShortStopLoss,
    ];

    /// Family whose oracle prices this order.
    #[must_use]
    pub const fn family(self) -> OrderFamily {
        match self {
            Self::PerpetualLimit | Self::PerpetualTakeProfit | Self::PerpetualStopLoss => {
                OrderFamily::Perpetual
            }
            Self::LongLimit | Self::LongTakeProfit | Self::LongStopLoss => {
                OrderFamily::LeveragedLong
            }
            Self::ShortLimit | Self::ShortTakeProfit | Self::ShortStopLoss => {
                OrderFamily::LeveragedShort
            }
        }
    }

    /// Role of this order within its family.
    #[must_use]
    pub const fn role(self) -> OrderRole {
        match self {
            Self::PerpetualLimit | Self::LongLimit | Self::ShortLimit => OrderRole::LimitEntry,
            Self::PerpetualTakeProfit | Self::LongTakeProfit | Self::ShortTakeProfit => {
                OrderRole::TakeProfit
            }
            Self::PerpetualStopLoss | Self::LongStopLoss | Self::ShortStopLoss => {
                OrderRole::StopLoss
            }
        }
    }

    /// Downstream action requested when this order fires.
    #[must_use]
    pub const fn request_kind(self) -> RequestKind {
        match self {
            Self::PerpetualLimit => RequestKind::OpenPosition,
            Self::PerpetualTakeProfit | Self::PerpetualStopLoss => RequestKind::ClosePosition,
            Self::LongLimit => RequestKind::MintLong,
            Self::LongTakeProfit | Self::LongStopLoss => RequestKind::BurnLong,
            Self::ShortLimit => RequestKind::MintShort,
            Self::ShortTakeProfit | Self::ShortStopLoss => RequestKind::BurnShort,
        }
    }

    /// Wire code (`1..=9`).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::PerpetualLimit => 1,
            Self::PerpetualTakeProfit => 2,
            Self::PerpetualStopLoss => 3,
            Self::LongLimit => 4,
            Self::LongTakeProfit => 5,
            Self::LongStopLoss => 6,
            Self::ShortLimit => 7,
            Self::ShortTakeProfit => 8,
            Self::ShortStopLoss => 9,
        }
    }

    /// Stable snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerpetualLimit => "perpetual_limit",
            Self::PerpetualTakeProfit => "perpetual_take_profit",
            Self::PerpetualStopLoss => "perpetual_stop_loss",
            Self::LongLimit => "long_limit",
            Self::LongTakeProfit => "long_take_profit",
            Self::LongStopLoss => "long_stop_loss",
            Self::ShortLimit => "short_limit",
            Self::ShortTakeProfit => "short_take_profit",
            Self::ShortStopLoss => "short_stop_loss",
        }
    }
}

impl TryFrom<u8> for OrderType {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1..=9 => Ok(Self::ALL[usize::from(code) - 1]),
            _ => Err(DomainError::UnknownOrderType { code }),
        }
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::UnknownOrderTypeName { name: s.to_string() })
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action that firing an order ultimately requests from the execution system.
///
/// Opaque to the engine beyond the [`OrderType::request_kind`] mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    OpenPosition,
    IncreasePosition,
    DecreasePosition,
    ClosePosition,
    AddCollateral,
    RemoveCollateral,
    Liquidate,
    MintLong,
    BurnLong,
    MintShort,
    BurnShort,
    VaultDeposit,
    VaultWithdraw,
    ClaimRewards,
}

impl RequestKind {
    /// All request kinds, in wire order.
    pub const ALL: [RequestKind; 14] = [
        RequestKind::OpenPosition,
        RequestKind::IncreasePosition,
        RequestKind::DecreasePosition,
        RequestKind::ClosePosition,
        RequestKind::AddCollateral,
        RequestKind::RemoveCollateral,
        RequestKind::Liquidate,
        RequestKind::MintLong,
        RequestKind::BurnLong,
        RequestKind::MintShort,
        RequestKind::BurnShort,
        RequestKind::VaultDeposit,
        RequestKind::VaultWithdraw,
        RequestKind::ClaimRewards,
    ];

    /// Wire code (`0..=13`).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenPosition => "open_position",
            Self::IncreasePosition => "increase_position",
            Self::DecreasePosition => "decrease_position",
            Self::ClosePosition => "close_position",
            Self::AddCollateral => "add_collateral",
            Self::RemoveCollateral => "remove_collateral",
            Self::Liquidate => "liquidate",
            Self::MintLong => "mint_long",
            Self::BurnLong => "burn_long",
            Self::MintShort => "mint_short",
            Self::BurnShort => "burn_short",
            Self::VaultDeposit => "vault_deposit",
            Self::VaultWithdraw => "vault_withdraw",
            Self::ClaimRewards => "claim_rewards",
        }
    }
}

impl TryFrom<u8> for RequestKind {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(DomainError::UnknownRequestKind { code })
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_for_live_types() {
        for order_type in OrderType::ALL {
            assert_eq!(OrderType::try_from(order_type.code()), Ok(order_type));
        }
    }

    #[test]
    fn none_and_out_of_range_codes_are_rejected() {
        assert_eq!(
            OrderType::try_from(0),
            Err(DomainError::UnknownOrderType { code: 0 })
        );
        assert_eq!(
            OrderType::try_from(10),
            Err(DomainError::UnknownOrderType { code: 10 })
        );
    }

    #[test]
    fn each_family_has_one_order_per_role() {
        for family in OrderFamily::ALL {
            let roles: Vec<_> = OrderType::ALL
                .into_iter()
                .filter(|t| t.family() == family)
                .map(OrderType::role)
                .collect();
            assert_eq!(
                roles,
                vec![OrderRole::LimitEntry, OrderRole::TakeProfit, OrderRole::StopLoss]
            );
        }
    }

    #[test]
    fn only_short_family_is_inverted() {
        assert_eq!(OrderFamily::Perpetual.direction(), Direction::Standard);
        assert_eq!(OrderFamily::LeveragedLong.direction(), Direction::Standard);
        assert_eq!(OrderFamily::LeveragedShort.direction(), Direction::Inverted);
    }

    #[test]
    fn limit_entries_open_and_exits_close() {
        assert_eq!(OrderType::PerpetualLimit.request_kind(), RequestKind::OpenPosition);
        assert_eq!(OrderType::PerpetualStopLoss.request_kind(), RequestKind::ClosePosition);
        assert_eq!(OrderType::LongLimit.request_kind(), RequestKind::MintLong);
        assert_eq!(OrderType::LongTakeProfit.request_kind(), RequestKind::BurnLong);
        assert_eq!(OrderType::ShortLimit.request_kind(), RequestKind::MintShort);
        assert_eq!(OrderType::ShortStopLoss.request_kind(), RequestKind::BurnShort);
    }

    #[test]
    fn request_kind_codes_round_trip() {
        for kind in RequestKind::ALL {
            assert_eq!(RequestKind::try_from(kind.code()), Ok(kind));
        }
        assert!(RequestKind::try_from(14).is_err());
        assert_eq!(RequestKind::ClaimRewards.to_string(), "claim_rewards");
    }

    #[test]
    fn order_type_parses_from_name() {
        assert_eq!("short_take_profit".parse(), Ok(OrderType::ShortTakeProfit));
        assert!("none".parse::<OrderType>().is_err());
    }
}
