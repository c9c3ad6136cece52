//! pocket-ledger - local balance and transaction ledger
//!
//! This library keeps a balance and a transaction history consistent on top
//! of an asynchronous key-value store that offers no transactions. The
//! binary is a thin command-line front end over the same types.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, transactions, categories)
//! - `storage`: The key-value boundary, its implementations and the ledger codec
//! - `services`: The ledger store and its reports
//! - `cli`: Command handlers for the binary
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,no_run
//! use pocket_ledger::{LedgerStore, MemoryStore};
//! use pocket_ledger::models::Money;
//!
//! # async fn run() -> pocket_ledger::LedgerResult<()> {
//! let ledger = LedgerStore::new(MemoryStore::new());
//! ledger.deposit(Money::from_cents(10_000)).await?;
//! ledger.record_transaction(Money::from_cents(-2_000), "Food", "lunch").await?;
//! assert_eq!(ledger.get_balance().await?, Money::from_cents(8_000));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult, StorageError};
pub use services::LedgerStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
