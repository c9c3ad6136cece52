//! Ledger CLI commands
//!
//! Balance, deposits, transactions, history and reconciliation.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_consistency, format_summary, format_transaction_details, format_transaction_register,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{category, Money};
use crate::services::LedgerStore;
use crate::storage::KeyValueStore;

/// Ledger subcommands
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Show the current balance
    Balance,
    /// Add funds to the balance
    Deposit {
        /// Amount to deposit (e.g., "100", "12.50")
        amount: String,
    },
    /// Record a transaction
    Add {
        /// Signed amount: negative for an expense, positive for income
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Category name (see `categories`), or any label for income
        #[arg(short, long)]
        category: String,
        /// What the transaction was for
        #[arg(short, long)]
        description: String,
    },
    /// List recorded transactions, most recent first
    History {
        /// Number of transactions to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Show every transaction
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
    /// Rebuild the balance from the recorded history and deposits
    Reconcile,
    /// Compare the stored balance with the recorded history
    Check,
    /// Show income and spending totals
    Summary,
}

/// Handle a ledger command
pub async fn handle_ledger_command<S: KeyValueStore>(
    ledger: &LedgerStore<S>,
    settings: &Settings,
    cmd: LedgerCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        LedgerCommands::Balance => {
            let balance = ledger.get_balance().await?;
            println!("Balance: {}", balance.format_with_symbol(symbol));
        }

        LedgerCommands::Deposit { amount } => {
            let amount = Money::parse(&amount).map_err(|e| {
                LedgerError::InvalidAmount(format!(
                    "'{}' is not an amount. Use a format like '100' or '12.50'. Error: {}",
                    amount, e
                ))
            })?;

            let balance = ledger.deposit(amount).await?;
            println!("Deposited {}.", amount.format_with_symbol(symbol));
            println!("Balance: {}", balance.format_with_symbol(symbol));
        }

        LedgerCommands::Add {
            amount,
            category,
            description,
        } => {
            let amount = Money::parse(&amount).map_err(|e| {
                LedgerError::InvalidInput(format!(
                    "'{}' is not an amount. Use a format like '-20.00' or '3000'. Error: {}",
                    amount, e
                ))
            })?;

            // Catalog names are stored with their canonical spelling
            let category = category::find_by_name(&category)
                .map(|c| c.display_name.to_string())
                .unwrap_or(category);

            let txn = ledger
                .record_transaction(amount, &category, &description)
                .await?;
            let balance = ledger.get_balance().await?;

            println!("Recorded {}:", txn.kind().to_string().to_lowercase());
            print!("{}", format_transaction_details(&txn, symbol));
            println!("Balance: {}", balance.format_with_symbol(symbol));
        }

        LedgerCommands::History { limit, all } => {
            let mut history = ledger.get_history().await?;
            let total = history.len();
            if !all {
                history.truncate(limit.unwrap_or(settings.history_limit));
            }

            print!("{}", format_transaction_register(&history, symbol));
            if history.len() < total {
                println!("({} of {} transactions shown)", history.len(), total);
            }
        }

        LedgerCommands::Reconcile => {
            let before = ledger.check_consistency().await?;
            let balance = ledger.recompute_balance_from_history().await?;

            if before.is_consistent() {
                println!("Balance already matched the history.");
            } else {
                println!(
                    "Corrected balance from {} to {}.",
                    before.stored_balance.format_with_symbol(symbol),
                    balance.format_with_symbol(symbol)
                );
            }
            println!("Balance: {}", balance.format_with_symbol(symbol));
        }

        LedgerCommands::Check => {
            let report = ledger.check_consistency().await?;
            print!("{}", format_consistency(&report, symbol));
        }

        LedgerCommands::Summary => {
            let summary = ledger.summary().await?;
            print!("{}", format_summary(&summary, symbol));
        }
    }

    Ok(())
}
