//! Error types for external collaborators.
//!
//! Chain adapters, quote providers, config stores and purchase ledgers live
//! outside this crate. Their failures are surfaced through
//! [`CollaboratorError`] with enough context to tell which one failed.

/// Failures reported by an external collaborator.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    /// The chain adapter failed (decimals lookup or settlement submission).
    #[error("Chain adapter failed during {operation}: {details}")]
    Chain {
        /// Operation being performed
        operation: String,
        /// Details about the failure
        details: String,
    },

    /// The swap quote provider failed or is not configured.
    #[error("Quote provider failed: {details}")]
    Quote {
        /// Details about the failure
        details: String,
    },

    /// The configuration store could not supply a snapshot.
    #[error("Config store failed: {details}")]
    ConfigStore {
        /// Details about the failure
        details: String,
    },

    /// The purchase ledger could not read or persist a record.
    #[error("Purchase ledger failed during {operation}: {details}")]
    Ledger {
        /// Operation being performed
        operation: String,
        /// Details about the failure
        details: String,
    },
}

impl CollaboratorError {
    /// Create a `Chain` error.
    pub fn chain(operation: impl Into<String>, details: impl Into<String>) -> Self {
        CollaboratorError::Chain {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Create a `Quote` error.
    pub fn quote(details: impl Into<String>) -> Self {
        CollaboratorError::Quote {
            details: details.into(),
        }
    }

    /// Create a `ConfigStore` error.
    pub fn config_store(details: impl Into<String>) -> Self {
        CollaboratorError::ConfigStore {
            details: details.into(),
        }
    }

    /// Create a `Ledger` error.
    pub fn ledger(operation: impl Into<String>, details: impl Into<String>) -> Self {
        CollaboratorError::Ledger {
            operation: operation.into(),
            details: details.into(),
        }
    }
}
