//! JSON Export functionality
//!
//! Exports the ledger to JSON with a schema version and export metadata.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction};

use super::ExportRecord;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub balance: String,

    pub deposit_total: String,

    /// All transactions, most recent first
    pub transactions: Vec<ExportRecord>,
}

impl LedgerExport {
    pub fn new(balance: Money, deposit_total: Money, history: &[Transaction]) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            balance: balance.to_string(),
            deposit_total: deposit_total.to_string(),
            transactions: history.iter().map(ExportRecord::from).collect(),
        }
    }
}

/// Export the ledger as pretty-printed JSON
pub fn export_ledger_json<W: Write>(export: &LedgerExport, writer: &mut W) -> LedgerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_export() {
        let history = vec![Transaction::new(Money::from_cents(-2000), "Food", "lunch")];
        let export = LedgerExport::new(Money::from_cents(8000), Money::from_cents(10000), &history);

        let mut out = Vec::new();
        export_ledger_json(&export, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["balance"], "80.00");
        assert_eq!(value["transactions"][0]["amount"], "-20.00");
        assert_eq!(value["transactions"][0]["type"], "expense");
    }
}
