//! Error types for fee tiers and card configuration.

use crate::types::amount::DecimalAmount;

/// Errors from constructing individual fee tiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeeTierError {
    /// The tier's lower bound is above its upper bound, so it could never match.
    #[error("Fee tier minimum {min} is above its maximum {max}")]
    InvertedRange {
        /// Lower bound
        min: DecimalAmount,
        /// Upper bound
        max: DecimalAmount,
    },
}

/// Errors from building or loading a [`CardConfig`](crate::CardConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `min_card_amount` is above `max_card_amount`.
    #[error("Card amount bounds are inverted: min {min} is above max {max}")]
    InvalidBounds {
        /// Minimum card amount
        min: DecimalAmount,
        /// Maximum card amount
        max: DecimalAmount,
    },

    /// The configuration JSON could not be decoded.
    #[error("Failed to parse card configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("Failed to read card configuration from {path}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create an `InvalidBounds` error.
    pub fn invalid_bounds(min: &DecimalAmount, max: &DecimalAmount) -> Self {
        ConfigError::InvalidBounds {
            min: min.clone(),
            max: max.clone(),
        }
    }
}
