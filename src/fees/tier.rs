//! Fee tier table
//!
//! A provider's fee schedule is a set of closed amount ranges, each with a
//! fee rate. Tables are replaced wholesale by admin tooling and never edited
//! tier by tier.
//!
//! Admin tooling does not check that tiers are disjoint, so lookup is defined
//! for overlapping tables too: tiers are sorted by `min_amount` descending
//! (ties keep their submitted order) and the first tier containing the amount
//! wins.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::FeeTierError;
use crate::types::amount::DecimalAmount;
use crate::types::percent::PercentRate;

/// Closed amount range `[min_amount, max_amount]` charged at `fee_rate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FeeTierRepr")]
pub struct FeeTier {
    min_amount: DecimalAmount,
    max_amount: DecimalAmount,
    fee_rate: PercentRate,
}

impl FeeTier {
    /// Create a tier, rejecting ranges whose minimum is above their maximum
    pub fn new(
        min_amount: DecimalAmount,
        max_amount: DecimalAmount,
        fee_rate: PercentRate,
    ) -> Result<Self, FeeTierError> {
        if min_amount > max_amount {
            return Err(FeeTierError::InvertedRange {
                min: min_amount,
                max: max_amount,
            });
        }
        Ok(Self {
            min_amount,
            max_amount,
            fee_rate,
        })
    }

    pub fn min_amount(&self) -> &DecimalAmount {
        &self.min_amount
    }

    pub fn max_amount(&self) -> &DecimalAmount {
        &self.max_amount
    }

    pub fn fee_rate(&self) -> PercentRate {
        self.fee_rate
    }

    /// Check `min_amount <= amount <= max_amount`
    pub fn contains(&self, amount: &DecimalAmount) -> bool {
        &self.min_amount <= amount && amount <= &self.max_amount
    }

    /// Check whether two tiers share at least one amount
    pub fn overlaps(&self, other: &FeeTier) -> bool {
        self.min_amount <= other.max_amount && other.min_amount <= self.max_amount
    }
}

#[derive(Deserialize)]
struct FeeTierRepr {
    min_amount: DecimalAmount,
    max_amount: DecimalAmount,
    fee_rate: PercentRate,
}

impl TryFrom<FeeTierRepr> for FeeTier {
    type Error = FeeTierError;

    fn try_from(repr: FeeTierRepr) -> Result<Self, Self::Error> {
        FeeTier::new(repr.min_amount, repr.max_amount, repr.fee_rate)
    }
}

/// Ordered fee tiers, sorted by `min_amount` descending
///
/// # Examples
///
/// ```
/// use instacard::{parse_decimal, parse_percent, FeeTier, FeeTierTable};
///
/// let tier = |min: &str, max: &str, rate: &str| {
///     FeeTier::new(
///         parse_decimal(min, 6).unwrap(),
///         parse_decimal(max, 6).unwrap(),
///         parse_percent(rate).unwrap(),
///     )
///     .unwrap()
/// };
///
/// let table = FeeTierTable::set_tiers(vec![
///     tier("5", "100", "6.5"),
///     tier("101", "500", "3"),
///     tier("501", "1500", "0.5"),
/// ]);
///
/// let rate = table.resolve_fee_rate(&parse_decimal("199", 6).unwrap());
/// assert_eq!(rate, Some(parse_percent("3").unwrap()));
/// assert_eq!(table.resolve_fee_rate(&parse_decimal("4999", 6).unwrap()), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FeeTier>", into = "Vec<FeeTier>")]
pub struct FeeTierTable {
    tiers: Vec<FeeTier>,
}

impl FeeTierTable {
    /// Table with no tiers; every lookup falls back to the default rate
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from a complete set of tiers, replacing any previous one
    ///
    /// Overlapping ranges are accepted and logged; lookup stays deterministic.
    pub fn set_tiers(mut tiers: Vec<FeeTier>) -> Self {
        tiers.sort_by(|a, b| b.min_amount.cmp(&a.min_amount));
        let table = Self { tiers };

        let overlaps = table.overlapping_pairs();
        if !overlaps.is_empty() {
            warn!(
                tiers = table.tiers.len(),
                overlapping_pairs = overlaps.len(),
                "Fee tier ranges overlap; the tier with the highest minimum wins"
            );
        }
        debug!(tiers = table.tiers.len(), "Fee tier table replaced");
        table
    }

    /// Fee rate of the first tier containing `amount`, or `None`
    pub fn resolve_fee_rate(&self, amount: &DecimalAmount) -> Option<PercentRate> {
        self.tiers
            .iter()
            .find(|tier| tier.contains(amount))
            .map(FeeTier::fee_rate)
    }

    /// Tiers in lookup order
    pub fn tiers(&self) -> &[FeeTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Index pairs (in lookup order) of tiers whose ranges overlap
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.tiers.iter().enumerate() {
            for (j, b) in self.tiers.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

impl From<Vec<FeeTier>> for FeeTierTable {
    fn from(tiers: Vec<FeeTier>) -> Self {
        Self::set_tiers(tiers)
    }
}

impl From<FeeTierTable> for Vec<FeeTier> {
    fn from(table: FeeTierTable) -> Self {
        table.tiers
    }
}

/// Resolve `amount` against `table`
///
/// Free-function form of [`FeeTierTable::resolve_fee_rate`].
pub fn resolve_fee_rate(table: &FeeTierTable, amount: &DecimalAmount) -> Option<PercentRate> {
    table.resolve_fee_rate(amount)
}
