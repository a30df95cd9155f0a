//! Domain validation errors for core domain types.
//!
//! These errors are returned when raw wire values (order type codes,
//! request kind codes) do not map onto a live domain variant.
//!
//! # Examples
//!
//! ```
//! use tripwire::domain::error::DomainError;
//! use tripwire::domain::OrderType;
//!
//! // Code 0 is the "none" sentinel and never names a live order type.
//! let result = OrderType::try_from(0u8);
//!
//! assert!(matches!(result, Err(DomainError::UnknownOrderType { code: 0 })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The order type code is the "none" sentinel or outside the nine live variants.
    #[error("unknown order type code {code}")]
    UnknownOrderType {
        /// The rejected wire code.
        code: u8,
    },

    /// The request kind code does not name one of the downstream kinds.
    #[error("unknown request kind code {code}")]
    UnknownRequestKind {
        /// The rejected wire code.
        code: u8,
    },

    /// The order type name could not be parsed.
    #[error("unknown order type '{name}'")]
    UnknownOrderTypeName {
        /// The rejected name.
        name: String,
    },
}
