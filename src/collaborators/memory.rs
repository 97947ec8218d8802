// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory config store and purchase ledger

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{ConfigStore, PurchaseLedger};
use crate::config::CardConfig;
use crate::errors::CollaboratorError;
use crate::fees::{CustomFeeRegistry, CustomTokenFee, FeeTierTable};
use crate::limits::PurchaseRecord;
use crate::types::identity::{BuyerId, TokenId};

/// Config store holding one [`CardConfig`] and a [`CustomFeeRegistry`]
///
/// Admin updates replace values wholesale; readers always see a complete
/// snapshot.
#[derive(Debug)]
pub struct MemoryConfigStore {
    config: RwLock<CardConfig>,
    custom_fees: RwLock<CustomFeeRegistry>,
}

impl MemoryConfigStore {
    pub fn new(config: CardConfig) -> Self {
        Self::with_custom_fees(config, CustomFeeRegistry::new())
    }

    pub fn with_custom_fees(config: CardConfig, custom_fees: CustomFeeRegistry) -> Self {
        Self {
            config: RwLock::new(config),
            custom_fees: RwLock::new(custom_fees),
        }
    }

    /// Replace the whole configuration
    pub async fn replace_config(&self, config: CardConfig) {
        *self.config.write().await = config;
        info!("Card config replaced");
    }

    /// Replace the fee tier table, keeping the rest of the config
    pub async fn set_fee_tiers(&self, table: FeeTierTable) {
        let mut config = self.config.write().await;
        let tiers = table.len();
        *config = config.clone().with_fee_tiers(table);
        info!(tiers, "Fee tiers replaced");
    }

    /// Insert or replace custom fees
    pub async fn set_custom_fees(&self, fees: impl IntoIterator<Item = CustomTokenFee>) {
        self.custom_fees.write().await.set_fees(fees);
    }

    /// Remove custom fees for `tokens`, returning how many existed
    pub async fn delete_custom_fees(&self, tokens: &[TokenId]) -> usize {
        self.custom_fees.write().await.delete_fees(tokens)
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn card_config(&self) -> Result<CardConfig, CollaboratorError> {
        Ok(self.config.read().await.clone())
    }

    async fn custom_fee(&self, token: &TokenId) -> Result<Option<CustomTokenFee>, CollaboratorError> {
        Ok(self.custom_fees.read().await.get(token))
    }
}

/// Purchase ledger backed by a map of buyer to record
#[derive(Debug, Default)]
pub struct MemoryLedger {
    records: RwLock<HashMap<BuyerId, PurchaseRecord>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buyers with a record
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PurchaseLedger for MemoryLedger {
    async fn purchase_record(&self, buyer: &BuyerId) -> Result<Option<PurchaseRecord>, CollaboratorError> {
        Ok(self.records.read().await.get(buyer).cloned())
    }

    async fn commit(&self, record: PurchaseRecord) -> Result<(), CollaboratorError> {
        debug!(
            buyer = %record.buyer,
            total_bought_today = %record.total_bought_today,
            "Committing purchase record"
        );
        self.records.write().await.insert(record.buyer.clone(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::timestamp::UnixSeconds;
    use crate::{parse_decimal, parse_percent, FeeTier};

    fn config() -> CardConfig {
        CardConfig::builder()
            .amount_bounds(parse_decimal("5", 6).unwrap(), parse_decimal("500", 6).unwrap())
            .daily_limit(parse_decimal("1000", 6).unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_config_store_admin_updates() {
        let store = MemoryConfigStore::new(config());
        assert!(store.card_config().await.unwrap().fee_tier_table().is_empty());

        let tier = FeeTier::new(
            parse_decimal("5", 6).unwrap(),
            parse_decimal("100", 6).unwrap(),
            parse_percent("6.5").unwrap(),
        )
        .unwrap();
        store.set_fee_tiers(FeeTierTable::set_tiers(vec![tier])).await;
        let snapshot = store.card_config().await.unwrap();
        assert_eq!(snapshot.fee_tier_table().len(), 1);
        assert_eq!(snapshot.max_card_amount(), &parse_decimal("500", 6).unwrap());

        let weth = TokenId::from("WETH");
        store
            .set_custom_fees([CustomTokenFee::new("WETH", parse_percent("1").unwrap())])
            .await;
        assert!(store.custom_fee(&weth).await.unwrap().is_some());
        assert_eq!(store.delete_custom_fees(&[weth.clone()]).await, 1);
        assert!(store.custom_fee(&weth).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ledger_commit_replaces_record() {
        let ledger = MemoryLedger::new();
        let buyer = BuyerId::from("buyer-1");
        assert!(ledger.purchase_record(&buyer).await.unwrap().is_none());

        ledger
            .commit(PurchaseRecord::new(buyer.clone(), parse_decimal("100", 6).unwrap(), UnixSeconds(1)))
            .await
            .unwrap();
        ledger
            .commit(PurchaseRecord::new(buyer.clone(), parse_decimal("150", 6).unwrap(), UnixSeconds(2)))
            .await
            .unwrap();

        let record = ledger.purchase_record(&buyer).await.unwrap().unwrap();
        assert_eq!(record.total_bought_today, parse_decimal("150", 6).unwrap());
        assert_eq!(record.last_purchase_timestamp, UnixSeconds(2));
        assert_eq!(ledger.len().await, 1);
    }
}
