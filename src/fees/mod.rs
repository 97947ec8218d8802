//! Fee resolution
//!
//! The fee for a purchase is chosen in this order:
//!
//! 1. A [`CustomTokenFee`] for the source asset, if one exists
//! 2. The first matching tier in the provider's [`FeeTierTable`]
//! 3. The provider's default rate (the 5% swap fallback unless configured)

mod custom;
mod tier;

pub use custom::{CustomFeeRegistry, CustomTokenFee};
pub use tier::{resolve_fee_rate, FeeTier, FeeTierTable};

use serde::{Deserialize, Serialize};

/// Which rule supplied the applied fee rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeSource {
    /// Per-token override
    Custom,
    /// Matching fee tier
    Tier,
    /// Provider default rate
    Default,
}

impl FeeSource {
    pub fn name(&self) -> &'static str {
        match self {
            FeeSource::Custom => "custom",
            FeeSource::Tier => "tier",
            FeeSource::Default => "default",
        }
    }
}

impl std::fmt::Display for FeeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
