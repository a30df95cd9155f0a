use alloy_primitives::Address;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{OrderFamily, OrderId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Lifecycle errors. Every one aborts the operation with no state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("caller {caller} is not authorized")]
    Unauthorized { caller: Address },

    #[error("{acting_owner} does not own order {id}")]
    NotOwner { id: OrderId, acting_owner: Address },

    #[error("order {id} not found")]
    NotFound { id: OrderId },

    #[error("order {id} does not expire until {expires_at}")]
    NotExpired { id: OrderId, expires_at: u64 },

    #[error("trigger condition not met for order {id}")]
    ConditionNotMet { id: OrderId },

    #[error("order {id} already exists")]
    AlreadyExists { id: OrderId },

    #[error("order owner cannot be the zero address")]
    ZeroOwner,

    #[error("trusted caller cannot be the zero address")]
    ZeroTrustedCaller,

    #[error("expiration period must be greater than 0")]
    InvalidExpirationPeriod,

    #[error("no oracle routed for family {family}")]
    NoOracle { family: OrderFamily },
}

/// Price oracle failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("oracle unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("sample {value} exceeds oracle maximum {max}")]
    OutOfRange {
        value: alloy_primitives::U256,
        max: alloy_primitives::U256,
    },

    #[error("raw precision {raw_decimals} cannot be truncated to {decimals} decimals")]
    InvalidPrecision { decimals: u32, raw_decimals: u32 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("advancing the clock by {secs}s from {now} overflows")]
    ClockOverflow { now: u64, secs: u64 },
}

impl Error {
    /// The lifecycle error, if this is one.
    #[must_use]
    pub const fn as_order_error(&self) -> Option<&OrderError> {
        match self {
            Error::Order(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
