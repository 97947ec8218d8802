//! Token decimal precision type

use serde::{Deserialize, Serialize};

use crate::config::constants::MAX_DECIMALS;
use crate::errors::MoneyError;

/// Number of fractional digits between a human-readable amount and its
/// base-unit integer.
///
/// Most stablecoins use 6 decimals, but some bridged variants (e.g.
/// Binance-Peg USDC on BSC) use 18. Amounts in this crate support scales
/// from 0 to 18.
///
/// # Examples
///
/// ```
/// use instacard::TokenDecimals;
///
/// assert_eq!(TokenDecimals::USDC.as_u8(), 6);
/// assert!(TokenDecimals::new(18).is_supported());
/// assert!(TokenDecimals::try_new(19).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Largest supported scale
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Standard decimals for ETH-like tokens and bridged stablecoins (18)
    pub const STANDARD: Self = Self(18);

    /// USDC / USDT decimals on most chains (6)
    pub const USDC: Self = Self(6);

    /// Create a decimal precision value without range checking
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Create a decimal precision value, rejecting scales above 18
    pub fn try_new(decimals: u8) -> Result<Self, MoneyError> {
        let decimals = Self(decimals);
        decimals.ensure_supported()?;
        Ok(decimals)
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Check if decimals are in the supported range (0-18)
    pub const fn is_supported(&self) -> bool {
        self.0 <= MAX_DECIMALS
    }

    pub(crate) fn ensure_supported(&self) -> Result<(), MoneyError> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(MoneyError::unsupported_decimals(self.0, MAX_DECIMALS))
        }
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_decimals_constants() {
        assert_eq!(TokenDecimals::STANDARD.as_u8(), 18);
        assert_eq!(TokenDecimals::USDC.as_u8(), 6);
        assert_eq!(TokenDecimals::MAX.as_u8(), 18);
    }

    #[test]
    fn test_token_decimals_supported_range() {
        assert!(TokenDecimals::new(0).is_supported());
        assert!(TokenDecimals::new(18).is_supported());
        assert!(!TokenDecimals::new(19).is_supported());
        assert!(!TokenDecimals::new(255).is_supported());
    }

    #[test]
    fn test_try_new_rejects_large_scales() {
        assert_eq!(TokenDecimals::try_new(6), Ok(TokenDecimals::USDC));
        assert_eq!(
            TokenDecimals::try_new(24),
            Err(MoneyError::UnsupportedDecimals {
                decimals: 24,
                max: 18
            })
        );
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(format!("{}", TokenDecimals::USDC), "6 decimals");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TokenDecimals::USDC).unwrap();
        assert_eq!(json, "6");
        let back: TokenDecimals = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TokenDecimals::USDC);
    }
}
