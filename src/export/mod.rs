//! Export module for pocket-ledger
//!
//! - CSV: the transaction history (spreadsheet-compatible)
//! - JSON: balance, deposit total and history, machine-readable
//! - YAML: the same structure, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

use chrono::SecondsFormat;
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};

pub use self::csv::export_transactions_csv;
pub use self::json::{export_ledger_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_ledger_yaml;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown export format '{}' (expected csv, json or yaml)", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Flat, human-facing row for one transaction
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    /// Signed decimal amount
    pub amount: String,
}

impl From<&Transaction> for ExportRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            kind: txn.kind(),
            category: txn.category.clone(),
            description: txn.description.clone(),
            amount: txn.amount.to_string(),
        }
    }
}
