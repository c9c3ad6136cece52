//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod export;
pub mod ledger;

pub use category::handle_categories_command;
pub use export::{handle_export_command, ExportArgs};
pub use ledger::{handle_ledger_command, LedgerCommands};
