use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use pocket_ledger::cli::{
    handle_categories_command, handle_export_command, handle_ledger_command, ExportArgs,
    LedgerCommands,
};
use pocket_ledger::config::{LedgerPaths, Settings};
use pocket_ledger::error::LedgerError;
use pocket_ledger::logging::init_tracing;
use pocket_ledger::services::LedgerStore;
use pocket_ledger::storage::FileStore;

#[derive(Parser)]
#[command(
    name = "pocket-ledger",
    version,
    about = "Local balance and transaction ledger",
    long_about = "pocket-ledger keeps a balance and a history of income and expense \
                  transactions on disk, and can rebuild the balance from the history \
                  whenever the two disagree."
)]
struct Cli {
    /// Directory holding settings and ledger data
    #[arg(long, global = true, env = "POCKET_LEDGER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Ledger(LedgerCommands),

    /// List the spending categories
    Categories,

    /// Export the ledger
    Export(ExportArgs),

    /// Write the default settings and create the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);

    let ledger = LedgerStore::with_opening_balance(
        FileStore::new(paths.data_dir()),
        settings.opening_balance,
    );

    let outcome = match cli.command {
        Some(Commands::Ledger(cmd)) => handle_ledger_command(&ledger, &settings, cmd).await,
        Some(Commands::Categories) => {
            handle_categories_command();
            Ok(())
        }
        Some(Commands::Export(args)) => handle_export_command(&ledger, args).await,
        Some(Commands::Init) => {
            println!("Initializing pocket-ledger at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'pocket-ledger deposit <AMOUNT>' to add funds.");
            Ok(())
        }
        Some(Commands::Config) => {
            println!("pocket-ledger Configuration");
            println!("===========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Initialized:     {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Opening balance: {}", settings.format_money(settings.opening_balance));
            println!("  History limit:   {}", settings.history_limit);
            println!("  Log level:       {}", settings.log_level);
            Ok(())
        }
        None => {
            println!("pocket-ledger - local balance and transaction ledger");
            println!();
            println!("Run 'pocket-ledger --help' for usage information.");
            Ok(())
        }
    };

    if let Err(err) = &outcome {
        report_hint(err);
    }

    Ok(outcome?)
}

fn report_hint(err: &LedgerError) {
    if err.is_partial_commit() {
        eprintln!("The record was saved but the balance was not updated.");
        eprintln!("Run 'pocket-ledger reconcile' to rebuild the balance.");
    } else if err.is_corrupt() {
        eprintln!("Stored ledger data could not be read; nothing was changed.");
    } else if err.is_retryable() {
        eprintln!("Storage was unavailable; nothing was changed. Try again.");
    }
}
