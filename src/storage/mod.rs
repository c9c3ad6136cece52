//! Storage layer for pocket-ledger
//!
//! The ledger persists into an opaque, asynchronous, string-keyed store. This
//! module defines that boundary ([`KeyValueStore`]), the keys the ledger owns,
//! and two implementations: an in-memory map and a directory of files written
//! atomically.

pub mod codec;
pub mod file_io;
pub mod file_store;
pub mod memory;

use std::future::Future;

pub use file_store::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Key holding the current balance as a decimal string
pub const BALANCE_KEY: &str = "balance";

/// Key holding the transaction history as a JSON array, most recent first
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Key holding the cumulative deposit total as a decimal string
pub const DEPOSITS_KEY: &str = "deposits";

/// An asynchronous string-keyed store
///
/// Each call either completes or fails outright. Implementations give no
/// atomicity across keys and no conditional writes.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if it was never written
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
