//! Error types for pocket-ledger
//!
//! Every failure path in the ledger maps to one distinguishable variant of
//! [`LedgerError`]. Nothing is collapsed into a generic failure.

use std::fmt;

use thiserror::Error;

use crate::models::{Money, Transaction};

/// Failure reported by a key-value store implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct StorageError(pub String);

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The write that reached the store before a compound operation failed
#[derive(Debug, Clone, PartialEq)]
pub enum CommittedWrite {
    /// The transaction was prepended to the persisted history
    Transaction(Box<Transaction>),
    /// The deposit total was increased by this amount
    Deposit(Money),
}

impl fmt::Display for CommittedWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transaction(txn) => write!(f, "transaction {}", txn.id),
            Self::Deposit(amount) => write!(f, "deposit of {}", amount),
        }
    }
}

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Deposit amount out of contract (zero or negative)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Transaction input out of contract
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A persisted record could not be decoded
    #[error("Corrupt data under '{key}': {reason}")]
    CorruptData { key: String, reason: String },

    /// The underlying store call failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    /// First write of a two-step operation landed, the balance write did not
    #[error("Partial commit: {committed} was saved but the balance was not updated: {cause}")]
    PartialCommit {
        committed: CommittedWrite,
        #[source]
        cause: Box<LedgerError>,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside the store
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a corrupt-data error for a store key
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptData {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller may retry the same call unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }

    /// Check if this is a partial commit
    pub fn is_partial_commit(&self) -> bool {
        matches!(self, Self::PartialCommit { .. })
    }

    /// Check if this is a corrupt-data error
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptData { .. })
    }

    /// The transaction that was recorded before a partial commit, if any
    pub fn committed_transaction(&self) -> Option<&Transaction> {
        match self {
            Self::PartialCommit {
                committed: CommittedWrite::Transaction(txn),
                ..
            } => Some(txn),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
