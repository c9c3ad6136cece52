//! Configuration module for pocket-ledger
//!
//! - Path resolution for settings and the file store
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
