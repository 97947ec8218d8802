// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Instant card purchase core
//!
//! Validates crypto-funded gift card purchases and computes their
//! settlement: exact decimal money, basis-point fee rates, tiered and
//! per-token fees, card amount bounds and a per-buyer daily limit.
//!
//! The core ([`PurchaseValidator`]) is pure and synchronous: config, custom
//! fee, the buyer's purchase record and the current time are passed in as
//! snapshots. [`CardPurchaser`] wires it to external collaborators (chain
//! adapters, swap quotes, config store, purchase ledger) for the full
//! workflow.
//!
//! # Quick start
//!
//! ```rust
//! use instacard::{
//!     parse_decimal, parse_percent, validate, CardConfig, FeeTier, FeeTierTable,
//!     PurchaseRequest, TokenDecimals, UnixSeconds,
//! };
//!
//! let d = |s| parse_decimal(s, 6).unwrap();
//! let config = CardConfig::builder()
//!     .amount_bounds(d("5"), d("500"))
//!     .daily_limit(d("1000"))
//!     .fee_tiers(FeeTierTable::set_tiers(vec![
//!         FeeTier::new(d("5"), d("100"), parse_percent("6.5")?)?,
//!         FeeTier::new(d("101"), d("500"), parse_percent("3")?)?,
//!     ]))
//!     .build()?;
//!
//! let request = PurchaseRequest::new("buyer-1", "USDC", "199", TokenDecimals::USDC);
//! let settlement = validate(&request, &config, None, None, UnixSeconds::now())?;
//!
//! assert_eq!(settlement.net_amount.to_string(), "193.03");
//! assert_eq!(settlement.net_base_units()?.as_u128(), Some(193_030_000));
//! # Ok::<(), instacard::InstacardError>(())
//! ```
//!
//! # Modules
//!
//! - [`types`]: money, percent, identity and time newtypes
//! - [`fees`]: fee tier tables and custom token fees
//! - [`limits`]: daily purchase limit tracking
//! - [`validator`]: purchase validation and settlement
//! - [`config`]: card configuration and constants
//! - [`collaborators`]: traits for chain adapters, quotes, config and ledger
//! - [`purchase`]: end-to-end purchase workflow
//! - [`errors`]: error types

pub mod collaborators;
pub mod config;
pub mod errors;
pub mod fees;
pub mod limits;
pub mod network;
pub mod purchase;
mod tracing;
pub mod types;
pub mod validator;

pub use collaborators::{
    ChainAdapter, ConfigStore, MemoryConfigStore, MemoryLedger, PurchaseLedger, QuoteProvider,
    SwapQuote,
};
pub use config::{CardConfig, CardConfigBuilder, ValidatorOptions};
pub use errors::{
    CollaboratorError, ConfigError, DailyLimitExceeded, FeeTierError, InstacardError, MoneyError,
    PercentError, PurchaseError, ValidationError,
};
pub use fees::{resolve_fee_rate, CustomFeeRegistry, CustomTokenFee, FeeSource, FeeTier, FeeTierTable};
pub use limits::{check_and_accumulate, DailyLimitTracker, DayState, PurchaseRecord};
pub use network::Network;
pub use purchase::{CardPurchaser, PurchaseOrder, PurchaseReceipt};
pub use types::amount::{from_base_units, parse_decimal, to_base_units, DecimalAmount};
pub use types::base_units::BaseUnits;
pub use types::decimals::TokenDecimals;
pub use types::identity::{BuyerId, Email, TokenId, TxId};
pub use types::percent::{apply_fee, parse_percent, to_basis_points, FeeSplit, PercentRate};
pub use types::timestamp::UnixSeconds;
pub use validator::{validate, PurchaseRequest, PurchaseValidator, Settlement};
