// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary-precision decimal amount type
//!
//! [`DecimalAmount`] is the user-facing side of the money model: an exact,
//! non-negative decimal tagged with the base-unit scale of its asset.
//! Arithmetic never rounds. Precision is only dropped when converting to
//! base units, and that conversion always truncates toward zero so that
//! fee and limit checks agree with integer on-chain settlement.
//!
//! ```text
//! "193.0345" --parse--> DecimalAmount(193.0345, 6 decimals)
//!     |                        |
//!     |                        | to_base_units (truncate)
//!     |                        v
//!     |                  BaseUnits(193_034_500)
//!     |                        |
//!     |                        | from_base_units
//!     v                        v
//! add / checked_sub     DecimalAmount(193.0345, 6 decimals)
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use std::sync::LazyLock;

use alloy_primitives::U256;
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::{BigDecimal, Zero};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::base_units::BaseUnits;
use super::decimals::TokenDecimals;
use crate::config::constants::{BPS_DENOMINATOR_DIGITS, DECIMAL_PATTERN};
use crate::errors::MoneyError;

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DECIMAL_PATTERN).expect("decimal pattern is a valid regex"));

/// Exact non-negative decimal amount with an associated base-unit scale
///
/// Parsing accepts any unsigned decimal string, including ones with more
/// fractional digits than `decimals`; the extra digits are kept until
/// [`to_base_units`](Self::to_base_units) truncates them.
///
/// Equality and ordering compare values only, so `1.50` at 6 decimals
/// equals `1.5` at 18 decimals.
///
/// # Examples
///
/// ```
/// use instacard::{DecimalAmount, TokenDecimals};
///
/// let amount = DecimalAmount::parse("1.9999", TokenDecimals::new(2)).unwrap();
/// assert_eq!(amount.to_base_units().unwrap().as_u128(), Some(199));
/// assert_eq!(amount.truncated().to_string(), "1.99");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DecimalAmountRepr", into = "DecimalAmountRepr")]
pub struct DecimalAmount {
    value: BigDecimal,
    decimals: TokenDecimals,
}

impl DecimalAmount {
    /// Parse an unsigned decimal string (`^[0-9]+(\.[0-9]+)?$`)
    ///
    /// # Errors
    ///
    /// - [`MoneyError::InvalidDecimalFormat`] for signs, exponents, `NaN`,
    ///   `Infinity`, whitespace or empty input
    /// - [`MoneyError::UnsupportedDecimals`] if `decimals` is above 18
    pub fn parse(input: &str, decimals: TokenDecimals) -> Result<Self, MoneyError> {
        decimals.ensure_supported()?;
        if !DECIMAL_RE.is_match(input) {
            return Err(MoneyError::invalid_decimal_format(input));
        }
        let value = BigDecimal::from_str(input)
            .map_err(|_| MoneyError::invalid_decimal_format(input))?;
        Ok(Self { value, decimals })
    }

    /// Build an amount from base units: `value / 10^decimals`
    ///
    /// The result is exact; no trailing precision is added.
    pub fn from_base_units(units: BaseUnits, decimals: TokenDecimals) -> Result<Self, MoneyError> {
        decimals.ensure_supported()?;
        let bytes = units.as_u256().to_be_bytes::<32>();
        let digits = BigInt::from_bytes_be(Sign::Plus, &bytes);
        let value = BigDecimal::new(digits, i64::from(decimals.as_u8())).normalized();
        Ok(Self { value, decimals })
    }

    /// Zero at the given scale
    pub fn zero(decimals: TokenDecimals) -> Self {
        Self {
            value: BigDecimal::zero(),
            decimals,
        }
    }

    /// Base-unit scale of this amount
    pub fn decimals(&self) -> TokenDecimals {
        self.decimals
    }

    /// Borrow the exact decimal value
    pub fn as_bigdecimal(&self) -> &BigDecimal {
        &self.value
    }

    /// Check if the amount is exactly zero
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Convert to base units at this amount's own scale, truncating
    pub fn to_base_units(&self) -> Result<BaseUnits, MoneyError> {
        let scaled = scaled_integer(&self.value, self.decimals.as_u8())
            .ok_or_else(|| MoneyError::base_unit_overflow(self))?;
        let (_, bytes) = scaled.to_bytes_be();
        if bytes.len() > 32 {
            return Err(MoneyError::base_unit_overflow(self));
        }
        U256::try_from_be_slice(&bytes)
            .map(BaseUnits::new)
            .ok_or_else(|| MoneyError::base_unit_overflow(self))
    }

    /// Drop any digits beyond this amount's scale, rounding toward zero
    ///
    /// Unlike [`to_base_units`](Self::to_base_units) this never overflows.
    pub fn truncated(&self) -> Self {
        let places = i64::from(self.decimals.as_u8());
        let value = match scaled_integer(&self.value, self.decimals.as_u8()) {
            Some(scaled) => BigDecimal::new(scaled, places).normalized(),
            None => self.value.clone(),
        };
        Self {
            value,
            decimals: self.decimals,
        }
    }

    /// Re-tag the amount with another scale without touching its value
    pub fn with_decimals(&self, decimals: TokenDecimals) -> Result<Self, MoneyError> {
        decimals.ensure_supported()?;
        Ok(Self {
            value: self.value.clone(),
            decimals,
        })
    }

    /// Subtract at full precision, returning `None` if the result would be negative
    ///
    /// The result keeps the larger of the two scales.
    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        if self.value < rhs.value {
            return None;
        }
        Some(Self {
            value: &self.value - &rhs.value,
            decimals: self.decimals.max(rhs.decimals),
        })
    }

    /// Exact `self * bps / 10000`
    pub(crate) fn mul_basis_points(&self, bps: u16) -> Self {
        let (digits, scale) = self.value.as_bigint_and_exponent();
        let value = BigDecimal::new(digits * BigInt::from(bps), scale + BPS_DENOMINATOR_DIGITS);
        Self {
            value,
            decimals: self.decimals,
        }
    }
}

/// Integer `value * 10^decimals`, truncated toward zero.
///
/// `None` only when the power of ten does not fit a `u32` exponent.
fn scaled_integer(value: &BigDecimal, decimals: u8) -> Option<BigInt> {
    let (digits, scale) = value.as_bigint_and_exponent();
    let shift = i64::from(decimals) - scale;
    let exponent = u32::try_from(shift.unsigned_abs()).ok()?;
    let factor = BigInt::from(10u8).pow(exponent);
    if shift >= 0 {
        Some(digits * factor)
    } else {
        Some(digits / factor)
    }
}

/// Render without exponent notation or trailing zeros.
fn format_plain(value: &BigDecimal) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    let (digits, scale) = value.normalized().as_bigint_and_exponent();
    if scale <= 0 {
        let exponent = u32::try_from(scale.unsigned_abs()).unwrap_or(u32::MAX);
        return (digits * BigInt::from(10u8).pow(exponent)).to_string();
    }

    let scale = scale as usize;
    let raw = digits.to_string();
    if raw.len() > scale {
        let (whole, fraction) = raw.split_at(raw.len() - scale);
        format!("{whole}.{fraction}")
    } else {
        format!("0.{}{}", "0".repeat(scale - raw.len()), raw)
    }
}

/// Parse a decimal string at the given scale
///
/// Free-function form of [`DecimalAmount::parse`].
///
/// # Examples
///
/// ```
/// use instacard::parse_decimal;
///
/// assert!(parse_decimal("1000.25", 6).is_ok());
/// assert!(parse_decimal("1e3", 6).is_err());
/// assert!(parse_decimal("NaN", 6).is_err());
/// ```
pub fn parse_decimal(input: &str, decimals: u8) -> Result<DecimalAmount, MoneyError> {
    DecimalAmount::parse(input, TokenDecimals::new(decimals))
}

/// Convert to base units at `decimals`, truncating toward zero
///
/// # Examples
///
/// ```
/// use instacard::{parse_decimal, to_base_units, BaseUnits};
///
/// let amount = parse_decimal("1.9999", 2).unwrap();
/// assert_eq!(to_base_units(&amount, 2).unwrap(), BaseUnits::from(199u64));
/// ```
pub fn to_base_units(amount: &DecimalAmount, decimals: u8) -> Result<BaseUnits, MoneyError> {
    amount
        .with_decimals(TokenDecimals::new(decimals))?
        .to_base_units()
}

/// Convert base units back into an exact decimal amount
///
/// # Examples
///
/// ```
/// use instacard::{from_base_units, BaseUnits};
///
/// let amount = from_base_units(BaseUnits::from(193_030_000u64), 6).unwrap();
/// assert_eq!(amount.to_string(), "193.03");
/// ```
pub fn from_base_units(value: BaseUnits, decimals: u8) -> Result<DecimalAmount, MoneyError> {
    DecimalAmount::from_base_units(value, TokenDecimals::new(decimals))
}

impl PartialEq for DecimalAmount {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for DecimalAmount {}

impl PartialOrd for DecimalAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DecimalAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Add<&DecimalAmount> for &DecimalAmount {
    type Output = DecimalAmount;

    fn add(self, rhs: &DecimalAmount) -> DecimalAmount {
        DecimalAmount {
            value: &self.value + &rhs.value,
            decimals: self.decimals.max(rhs.decimals),
        }
    }
}

impl Add for DecimalAmount {
    type Output = DecimalAmount;

    fn add(self, rhs: DecimalAmount) -> DecimalAmount {
        &self + &rhs
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_plain(&self.value))
    }
}

/// Wire form: `{ "value": "193.03", "decimals": 6 }`
#[derive(Serialize, Deserialize)]
struct DecimalAmountRepr {
    value: String,
    decimals: u8,
}

impl TryFrom<DecimalAmountRepr> for DecimalAmount {
    type Error = MoneyError;

    fn try_from(repr: DecimalAmountRepr) -> Result<Self, Self::Error> {
        DecimalAmount::parse(&repr.value, TokenDecimals::new(repr.decimals))
    }
}

impl From<DecimalAmount> for DecimalAmountRepr {
    fn from(amount: DecimalAmount) -> Self {
        Self {
            value: amount.to_string(),
            decimals: amount.decimals.as_u8(),
        }
    }
}
