//! YAML Export functionality
//!
//! Same structure as the JSON export, for human-readable backups.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};

use super::json::LedgerExport;

/// Export the ledger as YAML with a short header comment
pub fn export_ledger_yaml<W: Write>(export: &LedgerExport, writer: &mut W) -> LedgerResult<()> {
    writeln!(writer, "# pocket-ledger export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| LedgerError::Export(e.to_string()))
}
