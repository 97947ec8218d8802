// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw base-unit amount type

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Amount in the smallest integer denomination of an asset
///
/// This is what on-chain settlement moves: `1.5` USDC at 6 decimals is
/// `1_500_000` base units. Convert from a [`DecimalAmount`](crate::DecimalAmount)
/// with [`to_base_units`](crate::to_base_units), which truncates toward zero.
///
/// # Examples
///
/// ```
/// use instacard::{parse_decimal, to_base_units, BaseUnits};
///
/// let amount = parse_decimal("1.5", 6).unwrap();
/// let raw = to_base_units(&amount, 6).unwrap();
/// assert_eq!(raw, BaseUnits::from(1_500_000u64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseUnits(U256);

impl BaseUnits {
    /// Zero base units
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new base-unit amount from U256
    pub const fn new(amount: U256) -> Self {
        Self(amount)
    }

    /// Get the inner U256 value
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Convert to u128 if it fits
    pub fn as_u128(&self) -> Option<u128> {
        self.0.try_into().ok()
    }

    /// Subtract, returning `None` on underflow
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for BaseUnits {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for BaseUnits {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for BaseUnits {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl Add for BaseUnits {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for BaseUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
