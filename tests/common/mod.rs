//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pocket_ledger::models::Money;
use pocket_ledger::{KeyValueStore, LedgerStore, MemoryStore, StorageError};

/// Store wrapper that fails writes to one key a set number of times
#[derive(Debug, Clone)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_key: String,
    remaining: Arc<AtomicUsize>,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_key: String::new(),
            remaining: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail the next `times` writes to `key`
    pub fn fail_sets(mut self, key: &str, times: usize) -> Self {
        self.fail_key = key.to_string();
        self.remaining = Arc::new(AtomicUsize::new(times));
        self
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn should_fail(&self, key: &str) -> bool {
        key == self.fail_key
            && self
                .remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
    }
}

impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.should_fail(key) {
            return Err(StorageError::new(format!("simulated write failure on '{}'", key)));
        }
        self.inner.set(key, value).await
    }
}

pub fn cents(value: i64) -> Money {
    Money::from_cents(value)
}

/// Assert the ledger invariant against what is actually persisted
pub async fn assert_balanced<S: KeyValueStore>(ledger: &LedgerStore<S>) {
    let report = ledger.check_consistency().await.unwrap();
    assert!(
        report.is_consistent(),
        "stored {} but history implies {}",
        report.stored_balance,
        report.expected_balance
    );
}
