//! Percent rate type stored as basis points
//!
//! Fee rates arrive from admin tooling as percent strings (`"2.5"`,
//! `"100"`) and are kept as integer basis points with 0.01% granularity.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::amount::DecimalAmount;
use crate::config::constants::{BPS_DENOMINATOR, PERCENT_PATTERN};
use crate::errors::PercentError;

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PERCENT_PATTERN).expect("percent pattern is a valid regex"));

/// Non-negative rate in `[0, 100]` percent, stored as basis points (0-10000)
///
/// # Examples
///
/// ```
/// use instacard::PercentRate;
///
/// let rate = PercentRate::parse("2.5").unwrap();
/// assert_eq!(rate.basis_points(), 250);
/// assert_eq!(rate.to_string(), "2.5%");
///
/// assert!(PercentRate::parse("100.5").is_err());
/// assert!(PercentRate::parse("100.000").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PercentRate(u16);

impl PercentRate {
    /// 0%
    pub const ZERO: Self = Self(0);

    /// 100%
    pub const HUNDRED: Self = Self(BPS_DENOMINATOR);

    /// Parse a percent string
    ///
    /// Accepts `0` to `100`. For values below 100 any number of fraction
    /// digits is accepted and rounded half-up to the nearest basis point;
    /// `100` itself only allows `100`, `100.0` and `100.00`. Leading zeros
    /// (`"05"`) are rejected.
    pub fn parse(input: &str) -> Result<Self, PercentError> {
        if !PERCENT_RE.is_match(input) {
            return Err(PercentError::invalid_percent_format(input));
        }

        let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
        let whole: u32 = whole
            .parse()
            .map_err(|_| PercentError::invalid_percent_format(input))?;

        let mut digits = fraction.bytes().map(|b| u32::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let bps = whole * 100 + tenths * 10 + hundredths + u32::from(round_up);
        let bps = bps.min(u32::from(BPS_DENOMINATOR));
        Ok(Self(bps as u16))
    }

    /// Build a rate from basis points, rejecting values above 10000
    pub fn from_basis_points(bps: u16) -> Result<Self, PercentError> {
        if bps > BPS_DENOMINATOR {
            return Err(PercentError::BasisPointsOutOfRange { bps });
        }
        Ok(Self(bps))
    }

    /// Rate in basis points (0-10000)
    pub const fn basis_points(&self) -> u16 {
        self.0
    }

    /// Check if the rate is 0%
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Split `amount` into net and fee parts at this rate
    pub fn apply(&self, amount: &DecimalAmount) -> FeeSplit {
        apply_fee(amount, *self)
    }

    /// Percent value without the `%` sign, e.g. `"6.5"`
    pub fn as_percent_string(&self) -> String {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        match fraction {
            0 => whole.to_string(),
            f if f % 10 == 0 => format!("{whole}.{}", f / 10),
            f => format!("{whole}.{f:02}"),
        }
    }
}

/// Result of applying a fee rate to an amount
///
/// Both parts are exact; `net + fee` always equals the input amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSplit {
    /// Amount left after the fee
    pub net: DecimalAmount,
    /// Fee taken
    pub fee: DecimalAmount,
}

/// Parse a percent string into a [`PercentRate`]
///
/// # Examples
///
/// ```
/// use instacard::parse_percent;
///
/// assert_eq!(parse_percent("0.5").unwrap().basis_points(), 50);
/// assert_eq!(parse_percent("100.00").unwrap().basis_points(), 10_000);
/// assert!(parse_percent("-1").is_err());
/// ```
pub fn parse_percent(input: &str) -> Result<PercentRate, PercentError> {
    PercentRate::parse(input)
}

/// Basis points of a rate, always within `[0, 10000]`
pub fn to_basis_points(rate: PercentRate) -> u16 {
    rate.basis_points()
}

/// Compute `fee = amount * rate / 100` and `net = amount - fee` exactly
///
/// Nothing is truncated here. Truncation to base units happens only when
/// the net amount is converted for settlement.
///
/// # Examples
///
/// ```
/// use instacard::{apply_fee, parse_decimal, parse_percent};
///
/// let split = apply_fee(&parse_decimal("1000", 6).unwrap(), parse_percent("2.5").unwrap());
/// assert_eq!(split.fee.to_string(), "25");
/// assert_eq!(split.net.to_string(), "975");
/// ```
pub fn apply_fee(amount: &DecimalAmount, rate: PercentRate) -> FeeSplit {
    let fee = amount.mul_basis_points(rate.basis_points());
    let net = amount
        .checked_sub(&fee)
        .unwrap_or_else(|| DecimalAmount::zero(amount.decimals()));
    FeeSplit { net, fee }
}

impl fmt::Display for PercentRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent_string())
    }
}

impl TryFrom<String> for PercentRate {
    type Error = PercentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PercentRate> for String {
    fn from(rate: PercentRate) -> Self {
        rate.as_percent_string()
    }
}
