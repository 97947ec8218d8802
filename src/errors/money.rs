//! Error types for the money and percent models.
//!
//! These cover malformed user input (decimal and percent strings) and
//! values that cannot be represented at the requested scale.

/// Errors produced while parsing or converting monetary amounts.
///
/// # Examples
///
/// ```rust
/// use instacard::{DecimalAmount, MoneyError, TokenDecimals};
///
/// let err = DecimalAmount::parse("-1", TokenDecimals::USDC).unwrap_err();
/// assert!(matches!(err, MoneyError::InvalidDecimalFormat { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    /// The input is not an unsigned decimal number (`^\d+(\.\d+)?$`).
    ///
    /// Signs, exponents, `NaN`, `Infinity` and empty strings all land here.
    #[error("Invalid decimal format: {input:?}")]
    InvalidDecimalFormat {
        /// The rejected input
        input: String,
    },

    /// The requested decimal scale is above the supported maximum.
    #[error("Unsupported decimals: {decimals} (maximum is {max})")]
    UnsupportedDecimals {
        /// Requested decimals
        decimals: u8,
        /// Largest supported value
        max: u8,
    },

    /// The amount does not fit in a 256-bit base-unit integer.
    #[error("Amount {value} overflows 256-bit base units")]
    BaseUnitOverflow {
        /// Decimal rendering of the amount
        value: String,
    },
}

impl MoneyError {
    /// Create an `InvalidDecimalFormat` error for the given input.
    pub fn invalid_decimal_format(input: impl Into<String>) -> Self {
        MoneyError::InvalidDecimalFormat {
            input: input.into(),
        }
    }

    /// Create an `UnsupportedDecimals` error.
    pub fn unsupported_decimals(decimals: u8, max: u8) -> Self {
        MoneyError::UnsupportedDecimals { decimals, max }
    }

    /// Create a `BaseUnitOverflow` error.
    pub fn base_unit_overflow(value: impl std::fmt::Display) -> Self {
        MoneyError::BaseUnitOverflow {
            value: value.to_string(),
        }
    }
}

/// Errors produced while parsing percent strings or basis points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PercentError {
    /// The input is not a percent in `[0, 100]` accepted by the rate pattern.
    #[error("Invalid percent format: {input:?}")]
    InvalidPercentFormat {
        /// The rejected input
        input: String,
    },

    /// Basis points above 10000 (100%).
    #[error("Basis points out of range: {bps} (maximum is 10000)")]
    BasisPointsOutOfRange {
        /// The rejected value
        bps: u16,
    },
}

impl PercentError {
    /// Create an `InvalidPercentFormat` error for the given input.
    pub fn invalid_percent_format(input: impl Into<String>) -> Self {
        PercentError::InvalidPercentFormat {
            input: input.into(),
        }
    }
}
