//! Read-only views over the ledger
//!
//! Consistency reports compare the stored balance with the balance implied by
//! the persisted records. Summaries total the history for overview screens.

use std::collections::BTreeMap;

use crate::models::{Money, Transaction};

/// Result of comparing the stored balance with the persisted records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Balance as currently stored
    pub stored_balance: Money,
    /// Opening balance + deposit total + sum of the history
    pub expected_balance: Money,
    /// `stored_balance - expected_balance`
    pub drift: Money,
}

impl ConsistencyReport {
    pub fn new(stored_balance: Money, expected_balance: Money) -> Self {
        Self {
            stored_balance,
            expected_balance,
            drift: stored_balance - expected_balance,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.drift.is_zero()
    }
}

/// Totals over the whole ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub balance: Money,
    pub opening_balance: Money,
    pub deposit_total: Money,
    /// Sum of income transactions
    pub total_income: Money,
    /// Sum of expense transactions, as a positive amount
    pub total_expense: Money,
    pub income_count: usize,
    pub expense_count: usize,
    /// Expense totals per category, as positive amounts
    pub expenses_by_category: BTreeMap<String, Money>,
}

impl LedgerSummary {
    pub fn build(
        balance: Money,
        opening_balance: Money,
        deposit_total: Money,
        history: &[Transaction],
    ) -> Self {
        let mut summary = Self {
            balance,
            opening_balance,
            deposit_total,
            total_income: Money::zero(),
            total_expense: Money::zero(),
            income_count: 0,
            expense_count: 0,
            expenses_by_category: BTreeMap::new(),
        };

        for txn in history {
            if txn.is_expense() {
                let spent = txn.amount.abs();
                summary.total_expense += spent;
                summary.expense_count += 1;
                *summary
                    .expenses_by_category
                    .entry(txn.category.clone())
                    .or_default() += spent;
            } else {
                summary.total_income += txn.amount;
                summary.income_count += 1;
            }
        }

        summary
    }

    pub fn transaction_count(&self) -> usize {
        self.income_count + self.expense_count
    }

    /// Income minus expenses over the history (deposits excluded)
    pub fn net_flow(&self) -> Money {
        self.total_income - self.total_expense
    }
}
