// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Purchase validation
//!
//! [`PurchaseValidator::validate`] turns a raw [`PurchaseRequest`] plus the
//! caller's snapshots (config, custom fee, the buyer's record, the current
//! time) into a fee-adjusted [`Settlement`]. Checks run in a fixed order and
//! the first failure wins:
//!
//! 1. Buyer identity and recipient email
//! 2. Gross amount, truncated to the request's decimals
//! 3. Fee rate: custom fee, else matching tier, else the default rate
//! 4. Fee split
//! 5. Card amount range, checked on the net amount
//! 6. Daily limit, checked on the net amount
//!
//! Validation has no side effects. Submitting the settlement and persisting
//! [`Settlement::to_purchase_record`] are left to the caller, and should be
//! preceded by a fresh re-validation (see [`CardPurchaser`](crate::CardPurchaser)).

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{CardConfig, ValidatorOptions};
use crate::errors::{MoneyError, ValidationError};
use crate::fees::{CustomTokenFee, FeeSource};
use crate::limits::{DailyLimitTracker, PurchaseRecord};
use crate::tracing::spans;
use crate::types::amount::DecimalAmount;
use crate::types::base_units::BaseUnits;
use crate::types::decimals::TokenDecimals;
use crate::types::identity::{BuyerId, Email, TokenId};
use crate::types::percent::{apply_fee, PercentRate};
use crate::types::timestamp::UnixSeconds;

/// A buyer's request to purchase a card
///
/// `amount` is the gross amount in the settlement asset (after any swap),
/// as an unsigned decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub buyer: BuyerId,
    /// Recipient email, when the card is delivered by email
    pub email: Option<String>,
    /// Asset the buyer pays with, used for custom fee lookup
    pub source_token: TokenId,
    pub amount: String,
    /// Decimals of the settlement asset on the target network
    pub decimals: TokenDecimals,
}

impl PurchaseRequest {
    pub fn new(
        buyer: impl Into<BuyerId>,
        source_token: impl Into<TokenId>,
        amount: impl Into<String>,
        decimals: TokenDecimals,
    ) -> Self {
        Self {
            buyer: buyer.into(),
            email: None,
            source_token: source_token.into(),
            amount: amount.into(),
            decimals,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Fully resolved, fee-adjusted outcome of a validated purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub buyer: BuyerId,
    pub source_token: TokenId,
    /// Amount received, truncated to `decimals`
    pub gross_amount: DecimalAmount,
    /// Exact fee, `gross_amount * fee_rate_applied`
    pub fee_amount: DecimalAmount,
    /// Exact amount loaded onto the card, `gross_amount - fee_amount`
    pub net_amount: DecimalAmount,
    pub fee_rate_applied: PercentRate,
    pub fee_source: FeeSource,
    /// Buyer's daily total including this purchase
    pub updated_daily_total: DecimalAmount,
    pub decimals: TokenDecimals,
    /// Validation time, stored as the record's last purchase timestamp
    pub settled_at: UnixSeconds,
}

impl Settlement {
    pub fn gross_base_units(&self) -> Result<BaseUnits, MoneyError> {
        self.gross_amount.to_base_units()
    }

    /// Net amount in base units, truncated toward zero
    pub fn net_base_units(&self) -> Result<BaseUnits, MoneyError> {
        self.net_amount.to_base_units()
    }

    /// Fee in base units
    ///
    /// Computed as `gross - net` in base units so that the two settlement
    /// legs always add up to the gross amount; any sub-unit remainder from
    /// truncating the net goes to the fee.
    pub fn fee_base_units(&self) -> Result<BaseUnits, MoneyError> {
        let gross = self.gross_base_units()?;
        let net = self.net_base_units()?;
        gross
            .checked_sub(net)
            .ok_or_else(|| MoneyError::base_unit_overflow(&self.fee_amount))
    }

    /// Record to persist once the settlement is confirmed
    pub fn to_purchase_record(&self) -> PurchaseRecord {
        PurchaseRecord::new(
            self.buyer.clone(),
            self.updated_daily_total.clone(),
            self.settled_at,
        )
    }
}

/// Validates purchase requests against caller-supplied snapshots
///
/// Holds no mutable state; one validator can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct PurchaseValidator<Tz: TimeZone = Local> {
    options: ValidatorOptions,
    tracker: DailyLimitTracker<Tz>,
}

impl PurchaseValidator<Local> {
    /// Validator using the host's local calendar for daily limits
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            tracker: DailyLimitTracker::local(),
        }
    }
}

impl Default for PurchaseValidator<Local> {
    fn default() -> Self {
        Self::new(ValidatorOptions::default())
    }
}

impl<Tz: TimeZone> PurchaseValidator<Tz> {
    pub fn with_tracker(options: ValidatorOptions, tracker: DailyLimitTracker<Tz>) -> Self {
        Self { options, tracker }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn tracker(&self) -> &DailyLimitTracker<Tz> {
        &self.tracker
    }

    /// Validate `request` and compute its settlement
    ///
    /// `custom_fee` is ignored unless it targets the request's source token.
    /// `record` must be the request buyer's record, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use instacard::{
    ///     parse_decimal, parse_percent, CardConfig, DailyLimitTracker, FeeTier, FeeTierTable,
    ///     PurchaseRequest, PurchaseValidator, TokenDecimals, UnixSeconds, ValidatorOptions,
    /// };
    ///
    /// let d = |s| parse_decimal(s, 6).unwrap();
    /// let config = CardConfig::builder()
    ///     .amount_bounds(d("5"), d("500"))
    ///     .daily_limit(d("1000"))
    ///     .fee_tiers(FeeTierTable::set_tiers(vec![
    ///         FeeTier::new(d("5"), d("100"), parse_percent("6.5").unwrap()).unwrap(),
    ///         FeeTier::new(d("101"), d("500"), parse_percent("3").unwrap()).unwrap(),
    ///     ]))
    ///     .build()
    ///     .unwrap();
    ///
    /// let validator = PurchaseValidator::with_tracker(
    ///     ValidatorOptions::default(),
    ///     DailyLimitTracker::with_timezone(Utc),
    /// );
    /// let request = PurchaseRequest::new("buyer-1", "USDC", "199", TokenDecimals::USDC);
    ///
    /// let settlement = validator
    ///     .validate(&request, &config, None, None, UnixSeconds(1_705_305_600))
    ///     .unwrap();
    /// assert_eq!(settlement.fee_amount.to_string(), "5.97");
    /// assert_eq!(settlement.net_amount.to_string(), "193.03");
    /// assert_eq!(settlement.fee_rate_applied.to_string(), "3%");
    /// ```
    pub fn validate(
        &self,
        request: &PurchaseRequest,
        config: &CardConfig,
        custom_fee: Option<&CustomTokenFee>,
        record: Option<&PurchaseRecord>,
        now: UnixSeconds,
    ) -> Result<Settlement, ValidationError> {
        let span = spans::validate_purchase(&request.buyer, &request.source_token, request.decimals);
        let _guard = span.enter();

        match self.run_checks(request, config, custom_fee, record, now) {
            Ok(settlement) => {
                info!(
                    gross = %settlement.gross_amount,
                    fee = %settlement.fee_amount,
                    net = %settlement.net_amount,
                    fee_rate = %settlement.fee_rate_applied,
                    fee_source = %settlement.fee_source,
                    daily_total = %settlement.updated_daily_total,
                    "Purchase validated"
                );
                Ok(settlement)
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Purchase rejected");
                Err(e)
            }
        }
    }

    fn run_checks(
        &self,
        request: &PurchaseRequest,
        config: &CardConfig,
        custom_fee: Option<&CustomTokenFee>,
        record: Option<&PurchaseRecord>,
        now: UnixSeconds,
    ) -> Result<Settlement, ValidationError> {
        self.check_identity(request)?;

        let gross_amount = DecimalAmount::parse(&request.amount, request.decimals)?.truncated();

        let (fee_rate_applied, fee_source) =
            select_fee_rate(config, custom_fee, &request.source_token, &gross_amount);
        let split = apply_fee(&gross_amount, fee_rate_applied);

        if !config.amount_in_range(&split.net) {
            return Err(ValidationError::amount_out_of_range(
                config.min_card_amount(),
                config.max_card_amount(),
                &split.net,
            ));
        }

        if let Some(record) = record {
            if record.buyer != request.buyer {
                return Err(ValidationError::RecordMismatch {
                    expected: request.buyer.clone(),
                    found: record.buyer.clone(),
                });
            }
        }

        let updated_daily_total = self.tracker.check_and_accumulate(
            record,
            &split.net,
            config.daily_card_buy_limit(),
            now,
        )?;

        Ok(Settlement {
            buyer: request.buyer.clone(),
            source_token: request.source_token.clone(),
            gross_amount,
            fee_amount: split.fee,
            net_amount: split.net,
            fee_rate_applied,
            fee_source,
            updated_daily_total,
            decimals: request.decimals,
            settled_at: now,
        })
    }

    fn check_identity(&self, request: &PurchaseRequest) -> Result<(), ValidationError> {
        if !request.buyer.is_present() {
            return Err(ValidationError::MissingBuyer);
        }
        match request.email.as_deref() {
            Some(email) if Email::parse(email).is_none() => Err(ValidationError::invalid_email(email)),
            None if self.options.require_email => Err(ValidationError::invalid_email("")),
            _ => Ok(()),
        }
    }
}

/// Custom fee for the source token, else the matching tier, else the default
fn select_fee_rate(
    config: &CardConfig,
    custom_fee: Option<&CustomTokenFee>,
    source_token: &TokenId,
    gross_amount: &DecimalAmount,
) -> (PercentRate, FeeSource) {
    let custom_fee = custom_fee.filter(|fee| fee.applies_to(source_token));
    let span = spans::resolve_fee_rate(
        source_token,
        config.fee_tier_table().len(),
        custom_fee.is_some(),
    );
    let _guard = span.enter();

    let (rate, source) = if let Some(fee) = custom_fee {
        (fee.fee_rate, FeeSource::Custom)
    } else if let Some(rate) = config.fee_tier_table().resolve_fee_rate(gross_amount) {
        (rate, FeeSource::Tier)
    } else {
        (config.default_fee_rate(), FeeSource::Default)
    };

    debug!(fee_rate = %rate, fee_source = %source, "Fee rate selected");
    (rate, source)
}

/// Validate with default options and the host's local calendar
///
/// Free-function form of [`PurchaseValidator::validate`].
pub fn validate(
    request: &PurchaseRequest,
    config: &CardConfig,
    custom_fee: Option<&CustomTokenFee>,
    record: Option<&PurchaseRecord>,
    now: UnixSeconds,
) -> Result<Settlement, ValidationError> {
    PurchaseValidator::default().validate(request, config, custom_fee, record, now)
}
