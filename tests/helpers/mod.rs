// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for instacard integration tests
//!
//! Provides mock collaborators so purchase workflows can be tested without
//! real chains or swap APIs.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy_chains::NamedChain;
use async_trait::async_trait;
use instacard::{
    parse_decimal, parse_percent, CardConfig, ChainAdapter, CollaboratorError, DecimalAmount,
    FeeTier, FeeTierTable, Network, QuoteProvider, Settlement, SwapQuote, TokenDecimals, TokenId,
    TxId,
};

/// Settlement token used by [`MockChainAdapter::base_usdc`]
pub const USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
/// A non-settlement source asset
pub const WETH: &str = "0x4200000000000000000000000000000000000006";

/// 2024-01-15T08:00:00Z
pub const MORNING: i64 = 1_705_305_600;
pub const HOUR: i64 = 3600;

/// Amount at 6 decimals
pub fn usdc(s: &str) -> DecimalAmount {
    parse_decimal(s, 6).unwrap()
}

/// Card config with bounds [5, 500], daily limit 1000 and tiers
/// (5-100: 6.5%, 101-500: 3%)
pub fn standard_config() -> CardConfig {
    CardConfig::builder()
        .amount_bounds(usdc("5"), usdc("500"))
        .daily_limit(usdc("1000"))
        .fee_tiers(FeeTierTable::set_tiers(vec![
            FeeTier::new(usdc("5"), usdc("100"), parse_percent("6.5").unwrap()).unwrap(),
            FeeTier::new(usdc("101"), usdc("500"), parse_percent("3").unwrap()).unwrap(),
        ]))
        .build()
        .unwrap()
}

/// Install a tracing subscriber honoring `RUST_LOG`, once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mock ChainAdapter that records submitted settlements
///
/// # Example
///
/// ```rust,ignore
/// let adapter = Arc::new(MockChainAdapter::base_usdc().with_token(WETH, 18));
/// let purchaser = CardPurchaser::new(adapter.clone(), store, ledger);
/// // ...
/// assert_eq!(adapter.submitted().len(), 1);
/// ```
pub struct MockChainAdapter {
    network: Network,
    settlement_token: TokenId,
    decimals: HashMap<TokenId, TokenDecimals>,
    submitted: Mutex<Vec<Settlement>>,
    fail_submit: bool,
    tx_counter: AtomicUsize,
}

impl MockChainAdapter {
    pub fn new(network: Network, settlement_token: &str) -> Self {
        let settlement_token = TokenId::from(settlement_token);
        let mut decimals = HashMap::new();
        decimals.insert(
            settlement_token.clone(),
            network.stablecoin_decimals(&settlement_token),
        );
        Self {
            network,
            settlement_token,
            decimals,
            submitted: Mutex::new(Vec::new()),
            fail_submit: false,
            tx_counter: AtomicUsize::new(0),
        }
    }

    /// USDC on Base
    pub fn base_usdc() -> Self {
        Self::new(Network::Evm(NamedChain::Base), USDC)
    }

    /// Register decimals for a non-settlement token
    pub fn with_token(mut self, token: &str, decimals: u8) -> Self {
        self.decimals
            .insert(TokenId::from(token), TokenDecimals::new(decimals));
        self
    }

    /// Make every submission fail
    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub fn submitted(&self) -> Vec<Settlement> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainAdapter for MockChainAdapter {
    fn network(&self) -> Network {
        self.network
    }

    fn settlement_token(&self) -> TokenId {
        self.settlement_token.clone()
    }

    async fn token_decimals(&self, token: &TokenId) -> Result<TokenDecimals, CollaboratorError> {
        self.decimals
            .get(token)
            .copied()
            .ok_or_else(|| CollaboratorError::chain("token_decimals", format!("unknown token {token}")))
    }

    async fn submit_settlement(&self, settlement: &Settlement) -> Result<TxId, CollaboratorError> {
        if self.fail_submit {
            return Err(CollaboratorError::chain("submit_settlement", "rpc unavailable"));
        }
        self.submitted.lock().unwrap().push(settlement.clone());
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TxId::new(format!("0xtx{n}")))
    }
}

/// Mock QuoteProvider returning a fixed settlement amount for every quote
pub struct MockQuoteProvider {
    dest_amount: String,
    dest_decimals: u8,
    calls: AtomicUsize,
}

impl MockQuoteProvider {
    pub fn fixed(dest_amount: &str, dest_decimals: u8) -> Self {
        Self {
            dest_amount: dest_amount.to_string(),
            dest_decimals,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    async fn quote(
        &self,
        source_token: &TokenId,
        source_amount: &DecimalAmount,
        dest_token: &TokenId,
    ) -> Result<SwapQuote, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let dest_amount = parse_decimal(&self.dest_amount, self.dest_decimals)
            .map_err(|e| CollaboratorError::quote(e.to_string()))?;
        Ok(SwapQuote::new(
            source_token.clone(),
            source_amount.clone(),
            dest_token.clone(),
            dest_amount,
        ))
    }
}
