//! Error types for the instacard library.
//!
//! Follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`MoneyError`],
//!   [`PercentError`], [`FeeTierError`], [`ValidationError`], ...)
//! - **Unified error type** ([`InstacardError`]) for callers that don't need
//!   to distinguish between sources
//!
//! # Examples
//!
//! ```rust
//! use instacard::{parse_decimal, parse_percent, InstacardError};
//!
//! fn parse_inputs(amount: &str, rate: &str) -> Result<(), InstacardError> {
//!     let _amount = parse_decimal(amount, 6)?;
//!     let _rate = parse_percent(rate)?;
//!     Ok(())
//! }
//!
//! assert!(parse_inputs("10.5", "2.5").is_ok());
//! assert!(matches!(
//!     parse_inputs("10.5", "101"),
//!     Err(InstacardError::Percent(_))
//! ));
//! ```

mod collaborator;
mod config;
mod money;
mod purchase;
mod validation;

pub use collaborator::CollaboratorError;
pub use config::{ConfigError, FeeTierError};
pub use money::{MoneyError, PercentError};
pub use purchase::PurchaseError;
pub use validation::{DailyLimitExceeded, ValidationError};

/// Unified error type for all instacard operations.
///
/// All module-specific errors convert into it via `From`, so `?` works
/// across module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum InstacardError {
    /// Error from the decimal money model.
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Error from the percent model.
    #[error("Percent error: {0}")]
    Percent(#[from] PercentError),

    /// Error from fee tier construction.
    #[error("Fee tier error: {0}")]
    FeeTier(#[from] FeeTierError),

    /// Error from card configuration.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Purchase validation rejection.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Failure in an external collaborator.
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Failure in the end-to-end purchase workflow.
    #[error("Purchase error: {0}")]
    Purchase(#[from] PurchaseError),
}
