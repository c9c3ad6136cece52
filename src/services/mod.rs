//! Service layer for pocket-ledger
//!
//! The service layer provides the ledger's business logic on top of the
//! storage layer: validation, compound writes, and reconciliation.

pub mod ledger;
pub mod report;

pub use ledger::LedgerStore;
pub use report::{ConsistencyReport, LedgerSummary};
