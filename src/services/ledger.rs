//! Ledger service
//!
//! [`LedgerStore`] is the only writer of the ledger keys. It keeps
//!
//! ```text
//! balance == opening_balance + deposit_total + Σ history amounts
//! ```
//!
//! true after every operation that returns `Ok`.
//!
//! The store underneath has no transactions, so each compound operation
//! reads and decodes everything it needs, then writes its record first
//! (history or deposit total) and the derived balance second. When the
//! balance write fails the caller gets [`LedgerError::PartialCommit`];
//! [`LedgerStore::recompute_balance_from_history`] rebuilds the balance from
//! the records and is safe to call at any time.
//!
//! Stores written before the `deposits` key existed hold deposited funds only
//! in `balance`. For those the deposit total is taken to be whatever part of
//! the stored balance the history does not explain, and the first mutation
//! persists it.
//!
//! Nothing here locks. Two ledgers sharing one store can interleave their
//! read-modify-write steps and lose an update; reconciliation repairs the
//! balance afterwards.

use crate::error::{CommittedWrite, LedgerError, LedgerResult};
use crate::models::{Money, Transaction};
use crate::storage::codec;
use crate::storage::{KeyValueStore, BALANCE_KEY, DEPOSITS_KEY, TRANSACTIONS_KEY};

use super::report::{ConsistencyReport, LedgerSummary};

/// Read-modify-write access to the persisted balance and history
#[derive(Debug, Clone)]
pub struct LedgerStore<S> {
    store: S,
    opening_balance: Money,
}

/// Decoded contents of all three ledger keys
struct LedgerState {
    history: Vec<Transaction>,
    balance: Money,
    deposit_total: Money,
    /// `false` when the deposit total was inferred and not yet persisted
    deposits_stored: bool,
}

impl<S: KeyValueStore> LedgerStore<S> {
    /// Create a ledger with a zero opening balance
    pub fn new(store: S) -> Self {
        Self::with_opening_balance(store, Money::zero())
    }

    pub fn with_opening_balance(store: S, opening_balance: Money) -> Self {
        Self {
            store,
            opening_balance,
        }
    }

    pub fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    /// Current balance; a balance never written is the opening balance
    pub async fn get_balance(&self) -> LedgerResult<Money> {
        let balance = self.read_balance().await?.unwrap_or(self.opening_balance);
        tracing::debug!(%balance, "read balance");
        Ok(balance)
    }

    /// Full history, most recent first
    pub async fn get_history(&self) -> LedgerResult<Vec<Transaction>> {
        let history = self.read_history().await?;
        tracing::debug!(count = history.len(), "read history");
        Ok(history)
    }

    /// Sum of all deposits made through this ledger
    pub async fn get_deposit_total(&self) -> LedgerResult<Money> {
        Ok(self.load().await?.deposit_total)
    }

    /// Add funds to the balance
    ///
    /// Deposits are not added to the history. They are accumulated in the
    /// deposit total, which is written before the balance.
    pub async fn deposit(&self, amount: Money) -> LedgerResult<Money> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(format!(
                "deposit must be greater than zero, got {}",
                amount
            )));
        }
        if !amount.is_within_limit() {
            return Err(LedgerError::InvalidAmount(format!(
                "deposit must not exceed {}, got {}",
                Money::MAX_AMOUNT,
                amount
            )));
        }

        let state = self.load().await?;
        let new_total = add(state.deposit_total, amount, DEPOSITS_KEY)?;
        let new_balance = add(state.balance, amount, BALANCE_KEY)?;

        self.store
            .set(DEPOSITS_KEY, &codec::encode_balance(new_total))
            .await?;

        if let Err(e) = self
            .store
            .set(BALANCE_KEY, &codec::encode_balance(new_balance))
            .await
        {
            tracing::warn!(%amount, error = %e, "deposit recorded but balance write failed");
            return Err(LedgerError::PartialCommit {
                committed: CommittedWrite::Deposit(amount),
                cause: Box::new(e.into()),
            });
        }

        tracing::info!(%amount, balance = %new_balance, "deposit committed");
        Ok(new_balance)
    }

    /// Record an income (positive) or expense (negative) transaction
    ///
    /// On full success the returned transaction is the head of the history
    /// and the balance includes its amount.
    pub async fn record_transaction(
        &self,
        amount: Money,
        category: &str,
        description: &str,
    ) -> LedgerResult<Transaction> {
        let txn = Transaction::new(amount, category, description);
        txn.validate()
            .map_err(|e| LedgerError::InvalidInput(e.to_string()))?;

        let mut state = self.load().await?;
        let new_balance = add(state.balance, txn.amount, BALANCE_KEY)?;
        state.history.insert(0, txn.clone());
        let encoded = codec::encode_history(&state.history)?;

        self.persist_inferred_deposits(&state).await?;
        self.store.set(TRANSACTIONS_KEY, &encoded).await?;

        // The transaction is durable from here on
        if let Err(e) = self
            .store
            .set(BALANCE_KEY, &codec::encode_balance(new_balance))
            .await
        {
            tracing::warn!(
                id = %txn.id,
                error = %e,
                "transaction recorded but balance update failed"
            );
            return Err(LedgerError::PartialCommit {
                committed: CommittedWrite::Transaction(Box::new(txn)),
                cause: Box::new(e.into()),
            });
        }

        tracing::info!(
            id = %txn.id,
            amount = %txn.amount,
            category = %txn.category,
            balance = %new_balance,
            "transaction committed"
        );
        Ok(txn)
    }

    /// Rebuild the balance from the persisted records and store it
    ///
    /// Idempotent: the result depends only on the history and deposit total.
    pub async fn recompute_balance_from_history(&self) -> LedgerResult<Money> {
        let state = self.load().await?;
        let balance = self.expected_balance(&state)?;

        self.persist_inferred_deposits(&state).await?;
        self.store
            .set(BALANCE_KEY, &codec::encode_balance(balance))
            .await?;

        tracing::info!(
            %balance,
            transactions = state.history.len(),
            "balance recomputed from history"
        );
        Ok(balance)
    }

    /// Compare the stored balance with the records without writing anything
    pub async fn check_consistency(&self) -> LedgerResult<ConsistencyReport> {
        let state = self.load().await?;
        let expected = self.expected_balance(&state)?;

        let report = ConsistencyReport::new(state.balance, expected);
        if !report.is_consistent() {
            tracing::warn!(
                stored = %report.stored_balance,
                expected = %report.expected_balance,
                drift = %report.drift,
                "balance drift detected"
            );
        }
        Ok(report)
    }

    /// Income and expense totals over the whole ledger
    pub async fn summary(&self) -> LedgerResult<LedgerSummary> {
        let state = self.load().await?;

        Ok(LedgerSummary::build(
            state.balance,
            self.opening_balance,
            state.deposit_total,
            &state.history,
        ))
    }

    /// Read and decode every key; fails before any write on corrupt data
    async fn load(&self) -> LedgerResult<LedgerState> {
        let history = self.read_history().await?;
        let stored_balance = self.read_balance().await?;
        let balance = stored_balance.unwrap_or(self.opening_balance);

        let (deposit_total, deposits_stored) = match self.store.get(DEPOSITS_KEY).await? {
            Some(raw) => (codec::decode_deposit_total(Some(&raw))?, true),
            None if stored_balance.is_none() => (Money::zero(), false),
            None => {
                let unexplained = self
                    .history_total(&history)
                    .and_then(|recorded| balance.checked_sub(recorded))
                    .ok_or_else(|| LedgerError::corrupt(BALANCE_KEY, "ledger total overflows"))?;
                tracing::debug!(deposits = %unexplained, "inferred deposit total from balance");
                (unexplained, false)
            }
        };

        Ok(LedgerState {
            history,
            balance,
            deposit_total,
            deposits_stored,
        })
    }

    async fn persist_inferred_deposits(&self, state: &LedgerState) -> LedgerResult<()> {
        if state.deposits_stored {
            return Ok(());
        }
        self.store
            .set(DEPOSITS_KEY, &codec::encode_balance(state.deposit_total))
            .await?;
        tracing::info!(deposits = %state.deposit_total, "deposit total recorded");
        Ok(())
    }

    /// Opening balance plus the history, without deposits
    fn history_total(&self, history: &[Transaction]) -> Option<Money> {
        history
            .iter()
            .try_fold(self.opening_balance, |acc, txn| acc.checked_add(txn.amount))
    }

    fn expected_balance(&self, state: &LedgerState) -> LedgerResult<Money> {
        self.history_total(&state.history)
            .and_then(|sum| sum.checked_add(state.deposit_total))
            .ok_or_else(|| LedgerError::corrupt(TRANSACTIONS_KEY, "ledger total overflows"))
    }

    async fn read_balance(&self) -> LedgerResult<Option<Money>> {
        match self.store.get(BALANCE_KEY).await? {
            None => Ok(None),
            Some(raw) => codec::decode_balance(Some(&raw)).map(Some),
        }
    }

    async fn read_history(&self) -> LedgerResult<Vec<Transaction>> {
        let raw = self.store.get(TRANSACTIONS_KEY).await?;
        codec::decode_history(raw.as_deref())
    }
}

fn add(current: Money, amount: Money, key: &str) -> LedgerResult<Money> {
    current
        .checked_add(amount)
        .ok_or_else(|| LedgerError::InvalidAmount(format!("{} would overflow", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn ledger() -> (MemoryStore, LedgerStore<MemoryStore>) {
        let store = MemoryStore::new();
        (store.clone(), LedgerStore::new(store))
    }

    #[tokio::test]
    async fn test_fresh_ledger_is_empty() {
        let (_, ledger) = ledger();
        assert_eq!(ledger.get_balance().await.unwrap(), Money::zero());
        assert!(ledger.get_history().await.unwrap().is_empty());
        assert_eq!(ledger.get_deposit_total().await.unwrap(), Money::zero());
    }

    #[tokio::test]
    async fn test_opening_balance_applies_when_unset() {
        let store = MemoryStore::new();
        let ledger = LedgerStore::with_opening_balance(store, Money::from_cents(5000));

        assert_eq!(ledger.get_balance().await.unwrap().cents(), 5000);
        ledger
            .record_transaction(Money::from_cents(-1000), "Food", "lunch")
            .await
            .unwrap();
        assert_eq!(ledger.get_balance().await.unwrap().cents(), 4000);
        assert_eq!(ledger.recompute_balance_from_history().await.unwrap().cents(), 4000);
    }

    #[tokio::test]
    async fn test_deposit_updates_balance_and_total() {
        let (store, ledger) = ledger();

        assert_eq!(ledger.deposit(Money::from_cents(10000)).await.unwrap().cents(), 10000);
        assert_eq!(ledger.deposit(Money::from_cents(250)).await.unwrap().cents(), 10250);

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.get(BALANCE_KEY).map(String::as_str), Some("102.50"));
        assert_eq!(snapshot.get(DEPOSITS_KEY).map(String::as_str), Some("102.50"));
        assert!(!snapshot.contains_key(TRANSACTIONS_KEY));
    }

    #[tokio::test]
    async fn test_deposit_rejects_non_positive() {
        let (store, ledger) = ledger();

        for cents in [0, -500] {
            let err = ledger.deposit(Money::from_cents(cents)).await.unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)));
        }
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_transaction_rejects_bad_input() {
        let (store, ledger) = ledger();

        let cases = [
            (Money::zero(), "Food", "lunch"),
            (Money::from_cents(-100), "", "lunch"),
            (Money::from_cents(-100), "Food", "   "),
        ];
        for (amount, category, description) in cases {
            let err = ledger
                .record_transaction(amount, category, description)
                .await
                .unwrap_err();
            assert!(matches!(err, LedgerError::InvalidInput(_)), "{:?}", err);
        }
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first() {
        let (_, ledger) = ledger();

        let first = ledger
            .record_transaction(Money::from_cents(-100), "Food", "coffee")
            .await
            .unwrap();
        let second = ledger
            .record_transaction(Money::from_cents(-200), "Bills", "phone")
            .await
            .unwrap();

        let history = ledger.get_history().await.unwrap();
        assert_eq!(history, vec![second, first]);
    }

    #[tokio::test]
    async fn test_corrupt_balance_blocks_mutations() {
        let store = MemoryStore::with_entries([(BALANCE_KEY, "NaN")]);
        let ledger = LedgerStore::new(store.clone());

        assert!(ledger.get_balance().await.unwrap_err().is_corrupt());
        assert!(ledger
            .deposit(Money::from_cents(100))
            .await
            .unwrap_err()
            .is_corrupt());

        assert!(ledger
            .record_transaction(Money::from_cents(-100), "Food", "lunch")
            .await
            .unwrap_err()
            .is_corrupt());
        assert!(ledger
            .recompute_balance_from_history()
            .await
            .unwrap_err()
            .is_corrupt());

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(BALANCE_KEY).map(String::as_str), Some("NaN"));
    }

    #[tokio::test]
    async fn test_amounts_over_the_limit_are_rejected() {
        let (store, ledger) = ledger();
        let over = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);

        let err = ledger.deposit(over).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)), "{:?}", err);
        for amount in [over, -over, Money::from_cents(i64::MAX)] {
            let err = ledger
                .record_transaction(amount, "Salary", "pay")
                .await
                .unwrap_err();
            assert!(matches!(err, LedgerError::InvalidInput(_)), "{:?}", err);
        }
        assert!(store.snapshot().unwrap().is_empty());

        let txn = ledger
            .record_transaction(Money::MAX_AMOUNT, "Salary", "pay")
            .await
            .unwrap();
        assert_eq!(ledger.get_history().await.unwrap(), vec![txn]);
        assert_eq!(ledger.get_balance().await.unwrap(), Money::MAX_AMOUNT);
    }

    #[tokio::test]
    async fn test_balance_overflow_commits_nothing() {
        let store = MemoryStore::with_entries([
            (BALANCE_KEY, "92233720368547758.00"),
            (DEPOSITS_KEY, "92233720368547758.00"),
        ]);
        let ledger = LedgerStore::new(store.clone());
        let before = store.snapshot().unwrap();

        let err = ledger
            .record_transaction(Money::MAX_AMOUNT, "Salary", "pay")
            .await
            .unwrap_err();
        assert!(!err.is_partial_commit());
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[tokio::test]
    async fn test_legacy_balance_becomes_deposit_total() {
        let (store, ledger) = ledger();
        store.set(BALANCE_KEY, "100").await.unwrap();

        assert_eq!(ledger.get_deposit_total().await.unwrap().cents(), 10000);
        assert!(ledger.check_consistency().await.unwrap().is_consistent());
        assert!(!store.snapshot().unwrap().contains_key(DEPOSITS_KEY));

        ledger
            .record_transaction(Money::from_cents(-2000), "Food", "lunch")
            .await
            .unwrap();
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.get(DEPOSITS_KEY).map(String::as_str), Some("100.00"));
        assert_eq!(snapshot.get(BALANCE_KEY).map(String::as_str), Some("80.00"));
        assert_eq!(ledger.recompute_balance_from_history().await.unwrap().cents(), 8000);
    }

    #[tokio::test]
    async fn test_first_transaction_records_zero_deposits() {
        let store = MemoryStore::new();
        let ledger = LedgerStore::new(store.clone());
        ledger
            .record_transaction(Money::from_cents(-500), "Food", "coffee")
            .await
            .unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.get(DEPOSITS_KEY).map(String::as_str), Some("0.00"));
        assert_eq!(snapshot.get(BALANCE_KEY).map(String::as_str), Some("-5.00"));
    }

    #[tokio::test]
    async fn test_corrupt_history_is_reported_not_reset() {
        let store = MemoryStore::with_entries([(TRANSACTIONS_KEY, "[{garbage")]);
        let ledger = LedgerStore::new(store.clone());

        assert!(ledger.get_history().await.unwrap_err().is_corrupt());
        assert!(ledger
            .record_transaction(Money::from_cents(-100), "Food", "lunch")
            .await
            .unwrap_err()
            .is_corrupt());
        assert!(ledger
            .recompute_balance_from_history()
            .await
            .unwrap_err()
            .is_corrupt());

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.get(TRANSACTIONS_KEY).map(String::as_str), Some("[{garbage"));
        assert!(!snapshot.contains_key(BALANCE_KEY));
    }

    #[tokio::test]
    async fn test_check_consistency_detects_drift() {
        let (store, ledger) = ledger();
        ledger.deposit(Money::from_cents(10000)).await.unwrap();
        ledger
            .record_transaction(Money::from_cents(-2000), "Food", "lunch")
            .await
            .unwrap();
        assert!(ledger.check_consistency().await.unwrap().is_consistent());

        store.set(BALANCE_KEY, "100.00").await.unwrap();
        let report = ledger.check_consistency().await.unwrap();
        assert_eq!(report.stored_balance.cents(), 10000);
        assert_eq!(report.expected_balance.cents(), 8000);
        assert_eq!(report.drift.cents(), 2000);

        // Checking never writes
        assert_eq!(ledger.get_balance().await.unwrap().cents(), 10000);
    }

    #[tokio::test]
    async fn test_summary() {
        let (_, ledger) = ledger();
        ledger.deposit(Money::from_cents(10000)).await.unwrap();
        ledger
            .record_transaction(Money::from_cents(-2000), "Food", "lunch")
            .await
            .unwrap();
        ledger
            .record_transaction(Money::from_cents(300000), "Salary", "pay")
            .await
            .unwrap();

        let summary = ledger.summary().await.unwrap();
        assert_eq!(summary.balance.cents(), 308000);
        assert_eq!(summary.deposit_total.cents(), 10000);
        assert_eq!(summary.total_income.cents(), 300000);
        assert_eq!(summary.total_expense.cents(), 2000);
        assert_eq!(summary.transaction_count(), 2);
    }
}
