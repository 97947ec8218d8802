// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for purchase validation.
//!
//! Every variant is a caller-recoverable outcome. Validation is side-effect
//! free, so a failure never leaves partially mutated state behind.

use crate::types::amount::DecimalAmount;
use crate::types::identity::BuyerId;

use super::MoneyError;

/// The buyer's projected daily total would exceed the configured cap.
///
/// Returned by [`DailyLimitTracker::check_and_accumulate`](crate::DailyLimitTracker::check_and_accumulate)
/// and wrapped by [`ValidationError::DailyLimitExceeded`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Daily purchase limit exceeded: projected total {projected_total} is above limit {limit}")]
pub struct DailyLimitExceeded {
    /// Configured daily cap
    pub limit: DecimalAmount,
    /// Total the buyer would reach today with this purchase
    pub projected_total: DecimalAmount,
}

/// Reasons a purchase request is rejected.
///
/// Checks run in a fixed order and the first failure short-circuits:
/// buyer identity, amount format, amount range, daily limit.
///
/// # Examples
///
/// ```rust,ignore
/// match validator.validate(&request, &config, None, record.as_ref(), now) {
///     Ok(settlement) => submit(settlement),
///     Err(ValidationError::AmountOutOfRange { min, max, actual }) => {
///         eprintln!("{actual} must be between {min} and {max}");
///     }
///     Err(ValidationError::DailyLimitExceeded(e)) => {
///         eprintln!("try a smaller amount: {e}");
///     }
///     Err(e) => eprintln!("rejected: {e}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The buyer identifier is empty.
    #[error("Missing buyer identifier")]
    MissingBuyer,

    /// The recipient email is missing (when required) or malformed.
    #[error("Invalid email: {email:?}")]
    InvalidEmail {
        /// The rejected email, empty when none was supplied
        email: String,
    },

    /// The raw purchase amount could not be parsed or scaled.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),

    /// The fee-adjusted amount falls outside the provider's card bounds.
    #[error("Amount {actual} is outside the allowed range [{min}, {max}]")]
    AmountOutOfRange {
        /// Minimum card amount
        min: DecimalAmount,
        /// Maximum card amount
        max: DecimalAmount,
        /// Net amount that was checked
        actual: DecimalAmount,
    },

    /// The purchase would breach the buyer's daily cap.
    #[error(transparent)]
    DailyLimitExceeded(#[from] DailyLimitExceeded),

    /// The supplied purchase record belongs to a different buyer.
    #[error("Purchase record belongs to {found}, expected {expected}")]
    RecordMismatch {
        /// Buyer on the request
        expected: BuyerId,
        /// Buyer on the record
        found: BuyerId,
    },
}

impl ValidationError {
    /// Create an `InvalidEmail` error.
    pub fn invalid_email(email: impl Into<String>) -> Self {
        ValidationError::InvalidEmail {
            email: email.into(),
        }
    }

    /// Create an `AmountOutOfRange` error.
    pub fn amount_out_of_range(
        min: &DecimalAmount,
        max: &DecimalAmount,
        actual: &DecimalAmount,
    ) -> Self {
        ValidationError::AmountOutOfRange {
            min: min.clone(),
            max: max.clone(),
            actual: actual.clone(),
        }
    }

    /// Short machine-readable label, used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingBuyer => "missing_buyer",
            ValidationError::InvalidEmail { .. } => "invalid_email",
            ValidationError::InvalidAmount(_) => "invalid_amount",
            ValidationError::AmountOutOfRange { .. } => "amount_out_of_range",
            ValidationError::DailyLimitExceeded(_) => "daily_limit_exceeded",
            ValidationError::RecordMismatch { .. } => "record_mismatch",
        }
    }
}
