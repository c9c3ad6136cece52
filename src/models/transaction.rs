//! Transaction model
//!
//! A transaction is an immutable signed monetary event. Positive amounts are
//! income, negative amounts are expenses.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction, derived from the sign of its amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Kind for a signed amount; zero counts as income
    pub fn of(amount: Money) -> Self {
        if amount.is_negative() {
            Self::Expense
        } else {
            Self::Income
        }
    }

    /// Apply this kind's sign to a magnitude
    pub fn signed(&self, magnitude: Money) -> Money {
        match self {
            Self::Income => magnitude,
            Self::Expense => -magnitude,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Signed amount (positive for income, negative for expense)
    pub amount: Money,

    /// Category name, from the catalog or freeform
    pub category: String,

    /// What the transaction was for
    pub description: String,

    /// When the transaction was created (millisecond precision)
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction stamped with the current time
    pub fn new(amount: Money, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_timestamp(amount, category, description, Utc::now())
    }

    /// Create a transaction with an explicit creation time
    ///
    /// The timestamp is truncated to milliseconds, the precision it is
    /// persisted with.
    pub fn with_timestamp(
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let created_at = created_at.trunc_subsecs(3);
        Self {
            id: TransactionId::for_timestamp(&created_at),
            amount,
            category: category.into().trim().to_string(),
            description: description.into().trim().to_string(),
            created_at,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        TransactionKind::of(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }

        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge);
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.created_at.format("%Y-%m-%d"),
            self.category,
            self.description,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    ZeroAmount,
    AmountTooLarge,
    EmptyCategory,
    EmptyDescription,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAmount => write!(f, "Transaction amount must not be zero"),
            Self::AmountTooLarge => write!(
                f,
                "Transaction amount must not exceed {} in either direction",
                Money::MAX_AMOUNT
            ),
            Self::EmptyCategory => write!(f, "Transaction category must not be empty"),
            Self::EmptyDescription => write!(f, "Transaction description must not be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
