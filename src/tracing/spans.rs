//! Span creation helpers for instacard operations.
//!
//! Telemetry is kept out of business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     let _guard = span.enter();
//!     // Business logic here
//! }
//! ```

use tracing::{Level, Span};

use crate::limits::DayState;
use crate::network::Network;
use crate::types::decimals::TokenDecimals;
use crate::types::identity::{BuyerId, TokenId};

/// Create span for validating a single purchase request.
///
/// Parent: execute_purchase span, or None when called directly
/// Children: resolve_fee_rate, check_daily_limit
#[inline]
pub(crate) fn validate_purchase(buyer: &BuyerId, token: &TokenId, decimals: TokenDecimals) -> Span {
    tracing::span!(
        Level::INFO,
        "instacard.validate_purchase",
        buyer = %buyer,
        token = %token,
        decimals = decimals.as_u8(),
    )
}

/// Create span for choosing the fee rate of a purchase.
///
/// Parent: validate_purchase span
#[inline]
pub(crate) fn resolve_fee_rate(token: &TokenId, tiers: usize, has_custom_fee: bool) -> Span {
    tracing::debug_span!(
        "instacard.resolve_fee_rate",
        token = %token,
        tiers = tiers,
        has_custom_fee = has_custom_fee,
    )
}

/// Create span for a daily limit check.
///
/// Parent: validate_purchase span
#[inline]
pub(crate) fn check_daily_limit(buyer: Option<&BuyerId>, state: DayState) -> Span {
    tracing::debug_span!(
        "instacard.check_daily_limit",
        buyer = buyer.map(BuyerId::as_str),
        day_state = ?state,
    )
}

/// Create span for the end-to-end purchase workflow.
///
/// This is the main entry point when purchases go through collaborators.
///
/// Parent: None (root span for this operation)
/// Children: validate_purchase spans (initial check and re-check before submit)
#[inline]
pub(crate) fn execute_purchase(buyer: &BuyerId, token: &TokenId, network: &Network) -> Span {
    tracing::info_span!(
        "instacard.execute_purchase",
        buyer = %buyer,
        token = %token,
        network = %network,
    )
}
