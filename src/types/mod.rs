// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for the money model and purchase identities.
//!
//! ```text
//! "199.5" --parse_decimal--> DecimalAmount (exact, user-facing)
//!                                 |
//!                                 | to_base_units (truncate toward zero)
//!                                 v
//!                            BaseUnits (U256, chain-facing)
//!
//! "2.5" --parse_percent--> PercentRate (basis points, 0-10000)
//! ```

pub mod amount;
pub mod base_units;
pub mod decimals;
pub mod identity;
pub mod percent;
pub mod timestamp;

// Note: Public types are re-exported from lib.rs, not here
