//! Provider card configuration
//!
//! [`CardConfig`] is the read-only snapshot the validator consults: card
//! amount bounds, the per-buyer daily cap, the fee tier table and the
//! default fee rate. It is owned by an admin workflow outside this crate and
//! passed in by value on every validation.
//!
//! # Example: Builder
//!
//! ```rust
//! use instacard::{parse_decimal, parse_percent, CardConfig};
//!
//! let config = CardConfig::builder()
//!     .amount_bounds(parse_decimal("5", 6)?, parse_decimal("500", 6)?)
//!     .daily_limit(parse_decimal("1000", 6)?)
//!     .default_fee_rate(parse_percent("5")?)
//!     .build()?;
//!
//! assert_eq!(config.max_card_amount().to_string(), "500");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Both required stages (`amount_bounds`, `daily_limit`) can be called once
//! only, and `build` does not exist until both are set:
//!
//! ```compile_fail
//! use instacard::{parse_decimal, CardConfig};
//!
//! let config = CardConfig::builder()
//!     .amount_bounds(parse_decimal("5", 6).unwrap(), parse_decimal("500", 6).unwrap())
//!     .build();
//! ```
//!
//! # Example: JSON
//!
//! ```rust
//! use instacard::CardConfig;
//!
//! let config = CardConfig::from_json_str(r#"{
//!     "min_card_amount": {"value": "5", "decimals": 6},
//!     "max_card_amount": {"value": "500", "decimals": 6},
//!     "daily_card_buy_limit": {"value": "1000", "decimals": 6},
//!     "fee_tier_table": [],
//!     "default_fee_rate": "5"
//! }"#)?;
//! assert!(config.fee_tier_table().is_empty());
//! # Ok::<(), instacard::ConfigError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::fees::FeeTierTable;
use crate::types::amount::DecimalAmount;
use crate::types::percent::PercentRate;

pub mod constants;

use constants::DEFAULT_FEE_RATE_BPS;

/// Provider-wide configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardConfigRepr")]
pub struct CardConfig {
    min_card_amount: DecimalAmount,
    max_card_amount: DecimalAmount,
    daily_card_buy_limit: DecimalAmount,
    fee_tier_table: FeeTierTable,
    default_fee_rate: PercentRate,
}

impl CardConfig {
    /// Start a typed builder
    pub fn builder() -> CardConfigBuilder<Missing, Missing> {
        CardConfigBuilder {
            bounds: Missing,
            limit: Missing,
            fee_tier_table: FeeTierTable::empty(),
            default_fee_rate: default_fee_rate(),
        }
    }

    /// Parse and validate a JSON snapshot
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and validate a JSON snapshot from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn min_card_amount(&self) -> &DecimalAmount {
        &self.min_card_amount
    }

    pub fn max_card_amount(&self) -> &DecimalAmount {
        &self.max_card_amount
    }

    pub fn daily_card_buy_limit(&self) -> &DecimalAmount {
        &self.daily_card_buy_limit
    }

    pub fn fee_tier_table(&self) -> &FeeTierTable {
        &self.fee_tier_table
    }

    pub fn default_fee_rate(&self) -> PercentRate {
        self.default_fee_rate
    }

    /// New snapshot with the fee tier table replaced wholesale
    pub fn with_fee_tiers(self, fee_tier_table: FeeTierTable) -> Self {
        Self {
            fee_tier_table,
            ..self
        }
    }

    /// Check `min <= amount <= max`
    pub fn amount_in_range(&self, amount: &DecimalAmount) -> bool {
        &self.min_card_amount <= amount && amount <= &self.max_card_amount
    }
}

fn default_fee_rate() -> PercentRate {
    PercentRate::from_basis_points(DEFAULT_FEE_RATE_BPS).unwrap_or(PercentRate::ZERO)
}

#[derive(Deserialize)]
struct CardConfigRepr {
    min_card_amount: DecimalAmount,
    max_card_amount: DecimalAmount,
    daily_card_buy_limit: DecimalAmount,
    #[serde(default)]
    fee_tier_table: FeeTierTable,
    #[serde(default = "default_fee_rate")]
    default_fee_rate: PercentRate,
}

impl TryFrom<CardConfigRepr> for CardConfig {
    type Error = ConfigError;

    fn try_from(repr: CardConfigRepr) -> Result<Self, Self::Error> {
        if repr.min_card_amount > repr.max_card_amount {
            return Err(ConfigError::invalid_bounds(
                &repr.min_card_amount,
                &repr.max_card_amount,
            ));
        }
        Ok(Self {
            min_card_amount: repr.min_card_amount,
            max_card_amount: repr.max_card_amount,
            daily_card_buy_limit: repr.daily_card_buy_limit,
            fee_tier_table: repr.fee_tier_table,
            default_fee_rate: repr.default_fee_rate,
        })
    }
}

/// Builder stage marker: value not provided yet
#[derive(Debug, Clone, Copy)]
pub struct Missing;

/// Builder stage marker: value provided
#[derive(Debug, Clone)]
pub struct Provided<T>(T);

/// Builder for [`CardConfig`]
///
/// The type parameters track the two required stages (amount bounds and
/// daily limit). Fee tiers and the default fee rate are optional and
/// default to an empty table and 5%.
#[derive(Debug, Clone)]
pub struct CardConfigBuilder<B, L> {
    bounds: B,
    limit: L,
    fee_tier_table: FeeTierTable,
    default_fee_rate: PercentRate,
}

impl<L> CardConfigBuilder<Missing, L> {
    /// Set the inclusive card amount range
    pub fn amount_bounds(
        self,
        min: DecimalAmount,
        max: DecimalAmount,
    ) -> CardConfigBuilder<Provided<(DecimalAmount, DecimalAmount)>, L> {
        CardConfigBuilder {
            bounds: Provided((min, max)),
            limit: self.limit,
            fee_tier_table: self.fee_tier_table,
            default_fee_rate: self.default_fee_rate,
        }
    }
}

impl<B> CardConfigBuilder<B, Missing> {
    /// Set the per-buyer daily purchase cap
    pub fn daily_limit(self, limit: DecimalAmount) -> CardConfigBuilder<B, Provided<DecimalAmount>> {
        CardConfigBuilder {
            bounds: self.bounds,
            limit: Provided(limit),
            fee_tier_table: self.fee_tier_table,
            default_fee_rate: self.default_fee_rate,
        }
    }
}

impl<B, L> CardConfigBuilder<B, L> {
    /// Use `table` as the fee schedule
    pub fn fee_tiers(mut self, table: FeeTierTable) -> Self {
        self.fee_tier_table = table;
        self
    }

    /// Rate charged when no custom fee exists and no tier matches
    pub fn default_fee_rate(mut self, rate: PercentRate) -> Self {
        self.default_fee_rate = rate;
        self
    }
}

impl CardConfigBuilder<Provided<(DecimalAmount, DecimalAmount)>, Provided<DecimalAmount>> {
    /// Validate and build the configuration
    pub fn build(self) -> Result<CardConfig, ConfigError> {
        let Provided((min, max)) = self.bounds;
        let Provided(limit) = self.limit;
        CardConfig::try_from(CardConfigRepr {
            min_card_amount: min,
            max_card_amount: max,
            daily_card_buy_limit: limit,
            fee_tier_table: self.fee_tier_table,
            default_fee_rate: self.default_fee_rate,
        })
    }
}

/// Tuning for the purchase validator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorOptions {
    /// Reject requests without a recipient email
    pub require_email: bool,
}

impl ValidatorOptions {
    /// Options for issuers that deliver cards by email
    pub fn email_required() -> Self {
        Self {
            require_email: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_decimal, parse_percent, FeeTier};
    use std::io::Write;

    fn amount(s: &str) -> DecimalAmount {
        parse_decimal(s, 6).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let config = CardConfig::builder()
            .amount_bounds(amount("5"), amount("500"))
            .daily_limit(amount("1000"))
            .build()
            .unwrap();

        assert_eq!(config.min_card_amount(), &amount("5"));
        assert_eq!(config.daily_card_buy_limit(), &amount("1000"));
        assert!(config.fee_tier_table().is_empty());
        assert_eq!(config.default_fee_rate().basis_points(), 500);
    }

    #[test]
    fn test_builder_stages_in_any_order() {
        let config = CardConfig::builder()
            .default_fee_rate(parse_percent("1").unwrap())
            .daily_limit(amount("1000"))
            .amount_bounds(amount("5"), amount("500"))
            .build()
            .unwrap();
        assert_eq!(config.default_fee_rate(), parse_percent("1").unwrap());
    }

    #[test]
    fn test_builder_rejects_inverted_bounds() {
        let result = CardConfig::builder()
            .amount_bounds(amount("500"), amount("5"))
            .daily_limit(amount("1000"))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidBounds { .. })));
    }

    #[test]
    fn test_amount_in_range_is_inclusive() {
        let config = CardConfig::builder()
            .amount_bounds(amount("5"), amount("500"))
            .daily_limit(amount("1000"))
            .build()
            .unwrap();
        assert!(config.amount_in_range(&amount("5")));
        assert!(config.amount_in_range(&amount("500")));
        assert!(!config.amount_in_range(&amount("4.999999")));
        assert!(!config.amount_in_range(&amount("500.000001")));
    }

    #[test]
    fn test_with_fee_tiers_replaces_table() {
        let config = CardConfig::builder()
            .amount_bounds(amount("5"), amount("500"))
            .daily_limit(amount("1000"))
            .build()
            .unwrap();
        let tier = FeeTier::new(amount("5"), amount("100"), parse_percent("6.5").unwrap()).unwrap();
        let config = config.with_fee_tiers(FeeTierTable::set_tiers(vec![tier]));
        assert_eq!(config.fee_tier_table().len(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let config = CardConfig::builder()
            .amount_bounds(amount("5"), amount("500"))
            .daily_limit(amount("1000"))
            .fee_tiers(FeeTierTable::set_tiers(vec![FeeTier::new(
                amount("5"),
                amount("100"),
                parse_percent("6.5").unwrap(),
            )
            .unwrap()]))
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let back = CardConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_json_defaults_and_validation() {
        let config = CardConfig::from_json_str(
            r#"{
                "min_card_amount": {"value": "5", "decimals": 6},
                "max_card_amount": {"value": "500", "decimals": 6},
                "daily_card_buy_limit": {"value": "1000", "decimals": 6}
            }"#,
        )
        .unwrap();
        assert_eq!(config.default_fee_rate().basis_points(), 500);

        let result = CardConfig::from_json_str(
            r#"{
                "min_card_amount": {"value": "600", "decimals": 6},
                "max_card_amount": {"value": "500", "decimals": 6},
                "daily_card_buy_limit": {"value": "1000", "decimals": 6}
            }"#,
        );
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "min_card_amount": {{"value": "10", "decimals": 6}},
                "max_card_amount": {{"value": "2500", "decimals": 6}},
                "daily_card_buy_limit": {{"value": "5000", "decimals": 6}},
                "default_fee_rate": "2"
            }}"#
        )
        .unwrap();

        let config = CardConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.max_card_amount(), &amount("2500"));
        assert_eq!(config.default_fee_rate().basis_points(), 200);
    }

    #[test]
    fn test_from_missing_file() {
        let result = CardConfig::from_json_file("/nonexistent/instacard/config.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
