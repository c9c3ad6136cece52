//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{
    export_ledger_json, export_ledger_yaml, export_transactions_csv, ExportFormat, LedgerExport,
};
use crate::services::LedgerStore;
use crate::storage::KeyValueStore;

/// Arguments for the export command
#[derive(Args)]
pub struct ExportArgs {
    /// Output format: csv, json or yaml
    #[arg(short, long, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub async fn handle_export_command<S: KeyValueStore>(
    ledger: &LedgerStore<S>,
    args: ExportArgs,
) -> LedgerResult<()> {
    let history = ledger.get_history().await?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Csv => export_transactions_csv(&history, &mut writer)?,
        ExportFormat::Json | ExportFormat::Yaml => {
            let balance = ledger.get_balance().await?;
            let deposit_total = ledger.get_deposit_total().await?;
            let export = LedgerExport::new(balance, deposit_total, &history);
            if args.format == ExportFormat::Json {
                export_ledger_json(&export, &mut writer)?;
            } else {
                export_ledger_yaml(&export, &mut writer)?;
            }
        }
    }

    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    if let Some(path) = &args.output {
        eprintln!("Exported {} transactions to {}", history.len(), path.display());
    }

    Ok(())
}
