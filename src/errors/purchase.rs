//! Error type for the end-to-end purchase workflow.

use super::{CollaboratorError, MoneyError, ValidationError};

/// Errors from [`CardPurchaser`](crate::CardPurchaser).
///
/// Validation failures are returned before anything is submitted. A
/// `Collaborator` error after submission means the settlement may have been
/// sent but the ledger was not updated; callers should reconcile using the
/// chain adapter's transaction history.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    /// The request was rejected by the validator.
    #[error("Purchase rejected: {0}")]
    Validation(#[from] ValidationError),

    /// A source amount could not be parsed before quoting.
    #[error("Invalid source amount: {0}")]
    Money(#[from] MoneyError),

    /// An external collaborator failed.
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}
