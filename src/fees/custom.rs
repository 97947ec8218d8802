//! Per-token fee overrides
//!
//! A custom fee replaces tier resolution entirely for one source asset.
//! Overrides are set and deleted in bulk, keyed by the asset identifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::identity::TokenId;
use crate::types::percent::PercentRate;

/// Fee override for a specific source asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTokenFee {
    /// Source asset the override applies to
    pub token: TokenId,
    /// Rate charged instead of the tiered rate
    pub fee_rate: PercentRate,
}

impl CustomTokenFee {
    pub fn new(token: impl Into<TokenId>, fee_rate: PercentRate) -> Self {
        Self {
            token: token.into(),
            fee_rate,
        }
    }

    /// Check whether this override applies to `token`
    pub fn applies_to(&self, token: &TokenId) -> bool {
        &self.token == token
    }
}

/// Set of custom token fees, at most one per token
///
/// # Examples
///
/// ```
/// use instacard::{parse_percent, CustomFeeRegistry, CustomTokenFee, TokenId};
///
/// let mut registry = CustomFeeRegistry::new();
/// registry.set_fees([
///     CustomTokenFee::new("So11111111111111111111111111111111111111112", parse_percent("1").unwrap()),
///     CustomTokenFee::new("0xdAC17F958D2ee523a2206206994597C13D831ec7", parse_percent("0").unwrap()),
/// ]);
/// assert_eq!(registry.len(), 2);
///
/// let removed = registry.delete_fees(&[TokenId::from("0xdAC17F958D2ee523a2206206994597C13D831ec7")]);
/// assert_eq!(removed, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CustomTokenFee>", into = "Vec<CustomTokenFee>")]
pub struct CustomFeeRegistry {
    fees: HashMap<TokenId, PercentRate>,
}

impl CustomFeeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace overrides for every token in `fees`
    pub fn set_fees(&mut self, fees: impl IntoIterator<Item = CustomTokenFee>) {
        let mut count = 0usize;
        for fee in fees {
            self.fees.insert(fee.token, fee.fee_rate);
            count += 1;
        }
        debug!(updated = count, total = self.fees.len(), "Custom token fees set");
    }

    /// Remove overrides for `tokens`, returning how many existed
    pub fn delete_fees(&mut self, tokens: &[TokenId]) -> usize {
        let removed = tokens
            .iter()
            .filter(|token| self.fees.remove(*token).is_some())
            .count();
        debug!(removed, total = self.fees.len(), "Custom token fees deleted");
        removed
    }

    /// Override for `token`, if one exists
    pub fn get(&self, token: &TokenId) -> Option<CustomTokenFee> {
        self.fees.get(token).map(|rate| CustomTokenFee {
            token: token.clone(),
            fee_rate: *rate,
        })
    }

    pub fn len(&self) -> usize {
        self.fees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }

    /// All overrides, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = CustomTokenFee> + '_ {
        self.fees.iter().map(|(token, rate)| CustomTokenFee {
            token: token.clone(),
            fee_rate: *rate,
        })
    }
}

impl From<Vec<CustomTokenFee>> for CustomFeeRegistry {
    fn from(fees: Vec<CustomTokenFee>) -> Self {
        let mut registry = Self::new();
        registry.set_fees(fees);
        registry
    }
}

impl From<CustomFeeRegistry> for Vec<CustomTokenFee> {
    fn from(registry: CustomFeeRegistry) -> Self {
        registry
            .fees
            .into_iter()
            .map(|(token, fee_rate)| CustomTokenFee { token, fee_rate })
            .collect()
    }
}
