// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end card purchase through external collaborators
//!
//! [`CardPurchaser`] drives one purchase:
//!
//! 1. Look up the settlement token's decimals from the chain adapter
//! 2. If the buyer pays with another asset, quote the swap; the quoted
//!    settlement amount becomes the gross amount
//! 3. Load config, custom fee and the buyer's record, then validate
//! 4. Re-read the same state and validate again immediately before submit
//! 5. Submit the settlement through the chain adapter
//! 6. Commit the updated purchase record to the ledger
//!
//! Steps 4 to 6 are not atomic. Two concurrent purchases by the same buyer
//! in different processes can both pass step 4; the ledger behind
//! [`PurchaseLedger`] is responsible for serializing commits if that
//! matters.

use std::sync::Arc;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn, Instrument};

use crate::collaborators::{ChainAdapter, ConfigStore, PurchaseLedger, QuoteProvider, SwapQuote};
use crate::errors::{CollaboratorError, PurchaseError};
use crate::tracing::spans;
use crate::types::amount::DecimalAmount;
use crate::types::identity::{BuyerId, TokenId, TxId};
use crate::types::timestamp::UnixSeconds;
use crate::validator::{PurchaseRequest, PurchaseValidator, Settlement};

/// A buyer's order, before decimals and swap pricing are known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub buyer: BuyerId,
    pub email: Option<String>,
    /// Asset the buyer pays with
    pub source_token: TokenId,
    /// Amount of `source_token`, as an unsigned decimal string
    pub amount: String,
}

impl PurchaseOrder {
    pub fn new(
        buyer: impl Into<BuyerId>,
        source_token: impl Into<TokenId>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            buyer: buyer.into(),
            email: None,
            source_token: source_token.into(),
            amount: amount.into(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Outcome of a submitted purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub tx_id: TxId,
    pub settlement: Settlement,
    /// Swap quote used, when the buyer paid with a non-settlement asset
    pub quote: Option<SwapQuote>,
}

/// Purchase workflow over a chain adapter, config store and ledger
///
/// # Examples
///
/// ```rust,ignore
/// let purchaser = CardPurchaser::new(adapter, Arc::new(MemoryConfigStore::new(config)), ledger)
///     .with_quote_provider(quotes);
///
/// let receipt = purchaser
///     .purchase(PurchaseOrder::new("buyer-1", "So11111111111111111111111111111111111111112", "1.5"))
///     .await?;
/// println!("card funded with {} in {}", receipt.settlement.net_amount, receipt.tx_id);
/// ```
pub struct CardPurchaser<Tz: TimeZone = Local> {
    chain: Arc<dyn ChainAdapter>,
    config_store: Arc<dyn ConfigStore>,
    ledger: Arc<dyn PurchaseLedger>,
    quotes: Option<Arc<dyn QuoteProvider>>,
    validator: PurchaseValidator<Tz>,
}

impl CardPurchaser<Local> {
    /// Purchaser with default validator options and the local calendar
    pub fn new(
        chain: Arc<dyn ChainAdapter>,
        config_store: Arc<dyn ConfigStore>,
        ledger: Arc<dyn PurchaseLedger>,
    ) -> Self {
        Self {
            chain,
            config_store,
            ledger,
            quotes: None,
            validator: PurchaseValidator::default(),
        }
    }
}

impl<Tz: TimeZone> CardPurchaser<Tz> {
    /// Enable purchases paid with assets other than the settlement token
    pub fn with_quote_provider(mut self, quotes: Arc<dyn QuoteProvider>) -> Self {
        self.quotes = Some(quotes);
        self
    }

    /// Replace the validator (options and daily limit timezone)
    pub fn with_validator<T: TimeZone>(self, validator: PurchaseValidator<T>) -> CardPurchaser<T> {
        CardPurchaser {
            chain: self.chain,
            config_store: self.config_store,
            ledger: self.ledger,
            quotes: self.quotes,
            validator,
        }
    }

    pub fn validator(&self) -> &PurchaseValidator<Tz> {
        &self.validator
    }

    /// Execute `order` at the current time
    pub async fn purchase(&self, order: PurchaseOrder) -> Result<PurchaseReceipt, PurchaseError> {
        self.purchase_at(order, UnixSeconds::now()).await
    }

    /// Execute `order` as of `now`
    pub async fn purchase_at(
        &self,
        order: PurchaseOrder,
        now: UnixSeconds,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let span = spans::execute_purchase(&order.buyer, &order.source_token, &self.chain.network());
        self.execute(order, now).instrument(span).await
    }

    async fn execute(
        &self,
        order: PurchaseOrder,
        now: UnixSeconds,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let settlement_token = self.chain.settlement_token();
        let decimals = self.chain.token_decimals(&settlement_token).await?;

        let (amount, quote) = if order.source_token == settlement_token {
            (order.amount.clone(), None)
        } else {
            let quote = self.quote_swap(&order, &settlement_token).await?;
            (quote.dest_amount.to_string(), Some(quote))
        };

        let request = PurchaseRequest {
            buyer: order.buyer,
            email: order.email,
            source_token: order.source_token,
            amount,
            decimals,
        };

        let initial = self.validate_against_store(&request, now).await?;

        // Re-check against fresh state right before submitting
        let settlement = self.validate_against_store(&request, now).await?;
        if settlement != initial {
            debug!(
                initial_total = %initial.updated_daily_total,
                fresh_total = %settlement.updated_daily_total,
                "State changed between checks; using re-validated settlement"
            );
        }

        let tx_id = self.chain.submit_settlement(&settlement).await?;

        if let Err(e) = self.ledger.commit(settlement.to_purchase_record()).await {
            warn!(
                tx_id = %tx_id,
                error = %e,
                "Settlement submitted but purchase record not committed"
            );
            return Err(e.into());
        }

        info!(
            tx_id = %tx_id,
            net = %settlement.net_amount,
            fee = %settlement.fee_amount,
            daily_total = %settlement.updated_daily_total,
            "Card purchase settled"
        );

        Ok(PurchaseReceipt {
            tx_id,
            settlement,
            quote,
        })
    }

    async fn quote_swap(
        &self,
        order: &PurchaseOrder,
        settlement_token: &TokenId,
    ) -> Result<SwapQuote, PurchaseError> {
        let quotes = self.quotes.as_ref().ok_or_else(|| {
            CollaboratorError::quote(format!(
                "no quote provider configured to swap {} into {}",
                order.source_token, settlement_token
            ))
        })?;

        let source_decimals = self.chain.token_decimals(&order.source_token).await?;
        let source_amount = DecimalAmount::parse(&order.amount, source_decimals)?;
        let quote = quotes
            .quote(&order.source_token, &source_amount, settlement_token)
            .await?;

        debug!(
            source_amount = %quote.source_amount,
            dest_amount = %quote.dest_amount,
            effective_rate = %quote.effective_rate,
            "Swap quoted"
        );
        Ok(quote)
    }

    async fn validate_against_store(
        &self,
        request: &PurchaseRequest,
        now: UnixSeconds,
    ) -> Result<Settlement, PurchaseError> {
        let config = self.config_store.card_config().await?;
        let custom_fee = self.config_store.custom_fee(&request.source_token).await?;
        let record = self.ledger.purchase_record(&request.buyer).await?;

        Ok(self
            .validator
            .validate(request, &config, custom_fee.as_ref(), record.as_ref(), now)?)
    }
}
