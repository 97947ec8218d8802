// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! External collaborators of the purchase workflow
//!
//! The validator itself is pure. Everything that touches the outside world
//! sits behind one of these traits:
//!
//! - [`ChainAdapter`]: one per network; supplies token decimals and submits
//!   settlements
//! - [`QuoteProvider`]: prices a swap from the buyer's asset into the
//!   settlement stablecoin
//! - [`ConfigStore`]: current [`CardConfig`] and custom token fees
//! - [`PurchaseLedger`]: per-buyer [`PurchaseRecord`]s
//!
//! [`MemoryConfigStore`] and [`MemoryLedger`] are in-process implementations
//! for tests and single-process deployments.
//!
//! # Example: Implementing ChainAdapter
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use instacard::{ChainAdapter, CollaboratorError, Network, Settlement, TokenDecimals, TokenId, TxId};
//!
//! struct SolanaAdapter {
//!     client: RpcClient,
//!     usdc_mint: TokenId,
//! }
//!
//! #[async_trait]
//! impl ChainAdapter for SolanaAdapter {
//!     fn network(&self) -> Network {
//!         Network::Solana
//!     }
//!
//!     fn settlement_token(&self) -> TokenId {
//!         self.usdc_mint.clone()
//!     }
//!
//!     async fn token_decimals(&self, token: &TokenId) -> Result<TokenDecimals, CollaboratorError> {
//!         Ok(self.network().stablecoin_decimals(token))
//!     }
//!
//!     async fn submit_settlement(&self, settlement: &Settlement) -> Result<TxId, CollaboratorError> {
//!         let net = settlement.net_base_units()
//!             .map_err(|e| CollaboratorError::chain("submit_settlement", e.to_string()))?;
//!         let signature = self.client.transfer(net).await
//!             .map_err(|e| CollaboratorError::chain("submit_settlement", e.to_string()))?;
//!         Ok(TxId::new(signature))
//!     }
//! }
//! ```

use async_trait::async_trait;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::config::CardConfig;
use crate::errors::CollaboratorError;
use crate::fees::CustomTokenFee;
use crate::limits::PurchaseRecord;
use crate::network::Network;
use crate::types::amount::DecimalAmount;
use crate::types::decimals::TokenDecimals;
use crate::types::identity::{BuyerId, TokenId, TxId};
use crate::validator::Settlement;

mod memory;

pub use memory::{MemoryConfigStore, MemoryLedger};

/// Network-specific settlement backend
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Network this adapter settles on
    fn network(&self) -> Network;

    /// Stablecoin that cards are funded with on this network
    fn settlement_token(&self) -> TokenId;

    /// Decimals of `token` on this network
    async fn token_decimals(&self, token: &TokenId) -> Result<TokenDecimals, CollaboratorError>;

    /// Sign and submit the settlement, returning its transaction id
    ///
    /// Implementations should move `net_base_units()` to the card issuer and
    /// `fee_base_units()` to the fee recipient.
    async fn submit_settlement(&self, settlement: &Settlement) -> Result<TxId, CollaboratorError>;
}

/// Quote for swapping the buyer's asset into the settlement token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub source_token: TokenId,
    pub source_amount: DecimalAmount,
    pub dest_token: TokenId,
    /// Settlement amount the swap yields; used as the purchase's gross amount
    pub dest_amount: DecimalAmount,
    /// `dest_amount / source_amount`, zero for a zero source amount
    pub effective_rate: BigDecimal,
}

impl SwapQuote {
    /// Build a quote, deriving the effective rate
    pub fn new(
        source_token: TokenId,
        source_amount: DecimalAmount,
        dest_token: TokenId,
        dest_amount: DecimalAmount,
    ) -> Self {
        let effective_rate = if source_amount.is_zero() {
            BigDecimal::zero()
        } else {
            dest_amount.as_bigdecimal() / source_amount.as_bigdecimal()
        };
        Self {
            source_token,
            source_amount,
            dest_token,
            dest_amount,
            effective_rate,
        }
    }
}

/// Swap pricing service
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Quote swapping `source_amount` of `source_token` into `dest_token`
    async fn quote(
        &self,
        source_token: &TokenId,
        source_amount: &DecimalAmount,
        dest_token: &TokenId,
    ) -> Result<SwapQuote, CollaboratorError>;
}

/// Source of provider configuration snapshots
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Current card configuration
    async fn card_config(&self) -> Result<CardConfig, CollaboratorError>;

    /// Custom fee for `token`, if one is set
    async fn custom_fee(&self, token: &TokenId) -> Result<Option<CustomTokenFee>, CollaboratorError>;
}

/// Store of per-buyer daily purchase records
#[async_trait]
pub trait PurchaseLedger: Send + Sync {
    /// The buyer's record, `None` if they have never purchased
    async fn purchase_record(&self, buyer: &BuyerId) -> Result<Option<PurchaseRecord>, CollaboratorError>;

    /// Persist `record` as the buyer's current record
    ///
    /// Call only after the settlement is confirmed.
    async fn commit(&self, record: PurchaseRecord) -> Result<(), CollaboratorError>;
}
