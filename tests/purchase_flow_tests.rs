// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the end-to-end purchase workflow

mod helpers;

use std::sync::Arc;

use alloy_chains::NamedChain;
use anyhow::Result;
use chrono::Utc;
use helpers::*;
use instacard::{
    parse_percent, BuyerId, CardPurchaser, CollaboratorError, CustomTokenFee, DailyLimitTracker,
    FeeSource, MemoryConfigStore, MemoryLedger, Network, PurchaseError, PurchaseLedger,
    PurchaseOrder, PurchaseRecord, PurchaseValidator, TokenDecimals, UnixSeconds, ValidationError,
    ValidatorOptions,
};

struct Harness {
    adapter: Arc<MockChainAdapter>,
    store: Arc<MemoryConfigStore>,
    ledger: Arc<MemoryLedger>,
    purchaser: CardPurchaser<Utc>,
}

fn harness(adapter: MockChainAdapter) -> Harness {
    init_tracing();
    let adapter = Arc::new(adapter);
    let store = Arc::new(MemoryConfigStore::new(standard_config()));
    let ledger = Arc::new(MemoryLedger::new());
    let purchaser = CardPurchaser::new(adapter.clone(), store.clone(), ledger.clone())
        .with_validator(PurchaseValidator::with_tracker(
            ValidatorOptions::default(),
            DailyLimitTracker::with_timezone(Utc),
        ));
    Harness {
        adapter,
        store,
        ledger,
        purchaser,
    }
}

#[tokio::test]
async fn test_direct_stablecoin_purchase_settles_and_commits() -> Result<()> {
    let h = harness(MockChainAdapter::base_usdc());

    let receipt = h
        .purchaser
        .purchase_at(PurchaseOrder::new("buyer-1", USDC, "199"), UnixSeconds(MORNING))
        .await?;

    assert_eq!(receipt.tx_id.as_str(), "0xtx1");
    assert!(receipt.quote.is_none());
    assert_eq!(receipt.settlement.fee_amount, usdc("5.97"));
    assert_eq!(receipt.settlement.net_amount, usdc("193.03"));
    assert_eq!(receipt.settlement.fee_source, FeeSource::Tier);

    assert_eq!(h.adapter.submitted(), vec![receipt.settlement.clone()]);

    let record = h
        .ledger
        .purchase_record(&BuyerId::from("buyer-1"))
        .await?
        .expect("record committed");
    assert_eq!(record.total_bought_today, usdc("193.03"));
    assert_eq!(record.last_purchase_timestamp, UnixSeconds(MORNING));
    Ok(())
}

#[tokio::test]
async fn test_daily_total_accumulates_across_purchases() -> Result<()> {
    let h = harness(MockChainAdapter::base_usdc());
    let buyer = BuyerId::from("buyer-1");

    // 500 at 3% nets 485 each time
    h.purchaser
        .purchase_at(PurchaseOrder::new("buyer-1", USDC, "500"), UnixSeconds(MORNING))
        .await?;
    h.purchaser
        .purchase_at(
            PurchaseOrder::new("buyer-1", USDC, "500"),
            UnixSeconds(MORNING + HOUR),
        )
        .await?;

    let record = h.ledger.purchase_record(&buyer).await?.unwrap();
    assert_eq!(record.total_bought_today, usdc("970"));

    let err = h
        .purchaser
        .purchase_at(
            PurchaseOrder::new("buyer-1", USDC, "100"),
            UnixSeconds(MORNING + 2 * HOUR),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PurchaseError::Validation(ValidationError::DailyLimitExceeded(_))
    ));
    assert_eq!(h.adapter.submitted().len(), 2);

    // Next calendar day the accumulator resets
    h.purchaser
        .purchase_at(
            PurchaseOrder::new("buyer-1", USDC, "100"),
            UnixSeconds(MORNING + 24 * HOUR),
        )
        .await?;
    let record = h.ledger.purchase_record(&buyer).await?.unwrap();
    assert_eq!(record.total_bought_today, usdc("93.5"));
    Ok(())
}

#[tokio::test]
async fn test_swap_purchase_uses_quoted_amount() -> Result<()> {
    let h = harness(MockChainAdapter::base_usdc().with_token(WETH, 18));
    let quotes = Arc::new(MockQuoteProvider::fixed("199.1234567", 6));
    let purchaser = CardPurchaser::new(h.adapter.clone(), h.store.clone(), h.ledger.clone())
        .with_quote_provider(quotes.clone())
        .with_validator(PurchaseValidator::with_tracker(
            ValidatorOptions::default(),
            DailyLimitTracker::with_timezone(Utc),
        ));

    let receipt = purchaser
        .purchase_at(PurchaseOrder::new("buyer-1", WETH, "0.06"), UnixSeconds(MORNING))
        .await?;

    assert_eq!(quotes.calls(), 1);
    let quote = receipt.quote.expect("swap quoted");
    assert_eq!(quote.source_amount, instacard::parse_decimal("0.06", 18)?);

    // Quoted amount is truncated to the settlement token's decimals
    assert_eq!(receipt.settlement.gross_amount, usdc("199.123456"));
    assert_eq!(receipt.settlement.source_token.as_str(), WETH);
    Ok(())
}

#[tokio::test]
async fn test_swap_without_quote_provider_fails_before_submit() {
    let h = harness(MockChainAdapter::base_usdc().with_token(WETH, 18));

    let err = h
        .purchaser
        .purchase_at(PurchaseOrder::new("buyer-1", WETH, "0.06"), UnixSeconds(MORNING))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PurchaseError::Collaborator(CollaboratorError::Quote { .. })
    ));
    assert!(h.adapter.submitted().is_empty());
    assert!(h.ledger.is_empty().await);
}

#[tokio::test]
async fn test_custom_fee_for_source_token() -> Result<()> {
    let h = harness(MockChainAdapter::base_usdc());
    h.store
        .set_custom_fees([CustomTokenFee::new(USDC, parse_percent("0")?)])
        .await;

    let receipt = h
        .purchaser
        .purchase_at(PurchaseOrder::new("buyer-1", USDC, "199"), UnixSeconds(MORNING))
        .await?;
    assert_eq!(receipt.settlement.fee_source, FeeSource::Custom);
    assert!(receipt.settlement.fee_amount.is_zero());
    assert_eq!(receipt.settlement.net_amount, usdc("199"));
    Ok(())
}

#[tokio::test]
async fn test_rejection_leaves_ledger_untouched() {
    let h = harness(MockChainAdapter::base_usdc());

    let err = h
        .purchaser
        .purchase_at(PurchaseOrder::new("buyer-1", USDC, "600"), UnixSeconds(MORNING))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PurchaseError::Validation(ValidationError::AmountOutOfRange { .. })
    ));
    assert!(h.adapter.submitted().is_empty());
    assert!(h.ledger.is_empty().await);
}

#[tokio::test]
async fn test_failed_submission_does_not_commit() {
    let h = harness(MockChainAdapter::base_usdc().failing_submit());

    let err = h
        .purchaser
        .purchase_at(PurchaseOrder::new("buyer-1", USDC, "199"), UnixSeconds(MORNING))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PurchaseError::Collaborator(CollaboratorError::Chain { .. })
    ));
    assert!(h.ledger.is_empty().await);
}

#[tokio::test]
async fn test_revalidation_sees_fresh_ledger_state() -> Result<()> {
    let h = harness(MockChainAdapter::base_usdc());

    // Another process committed a purchase for this buyer
    h.ledger
        .commit(PurchaseRecord::new(
            BuyerId::from("buyer-1"),
            usdc("950"),
            UnixSeconds(MORNING),
        ))
        .await?;

    let err = h
        .purchaser
        .purchase_at(
            PurchaseOrder::new("buyer-1", USDC, "100"),
            UnixSeconds(MORNING + HOUR),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PurchaseError::Validation(ValidationError::DailyLimitExceeded(_))
    ));
    assert!(h.adapter.submitted().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_bsc_binance_peg_usdc_settles_at_18_decimals() -> Result<()> {
    let bsc_usdc = "0x8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d";
    let h = harness(MockChainAdapter::new(
        Network::Evm(NamedChain::BinanceSmartChain),
        bsc_usdc,
    ));

    let receipt = h
        .purchaser
        .purchase_at(PurchaseOrder::new("buyer-1", bsc_usdc, "199"), UnixSeconds(MORNING))
        .await?;

    assert_eq!(receipt.settlement.decimals, TokenDecimals::STANDARD);
    let net = receipt.settlement.net_base_units()?;
    assert_eq!(net.as_u128(), Some(193_030_000_000_000_000_000));
    Ok(())
}
