//! CSV Export functionality
//!
//! One row per transaction, most recent first, spreadsheet-compatible.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

use super::ExportRecord;

/// Export the history to CSV
pub fn export_transactions_csv<W: Write>(
    history: &[Transaction],
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for txn in history {
        csv_writer
            .serialize(ExportRecord::from(txn))
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}
