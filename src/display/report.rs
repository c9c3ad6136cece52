//! Report formatting utilities for terminal output

use crate::services::{ConsistencyReport, LedgerSummary};

/// Format a ledger summary
pub fn format_summary(summary: &LedgerSummary, symbol: &str) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str("Ledger Summary\n");
    output.push_str("==============\n");
    output.push_str(&format!("Balance:         {:>14}\n", money(summary.balance)));
    if !summary.opening_balance.is_zero() {
        output.push_str(&format!("Opening balance: {:>14}\n", money(summary.opening_balance)));
    }
    output.push_str(&format!("Deposits:        {:>14}\n", money(summary.deposit_total)));
    output.push_str(&format!(
        "Income:          {:>14}  ({} transactions)\n",
        money(summary.total_income),
        summary.income_count
    ));
    output.push_str(&format!(
        "Expenses:        {:>14}  ({} transactions)\n",
        money(summary.total_expense),
        summary.expense_count
    ));

    if !summary.expenses_by_category.is_empty() {
        output.push_str("\nSpending by category:\n");
        for (category, amount) in &summary.expenses_by_category {
            output.push_str(&format!("  {:20} {:>14}\n", category, money(*amount)));
        }
    }

    output
}

/// Format a consistency check result
pub fn format_consistency(report: &ConsistencyReport, symbol: &str) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);

    if report.is_consistent() {
        return format!(
            "Ledger is consistent. Balance: {}\n",
            money(report.stored_balance)
        );
    }

    format!(
        "Balance drift detected!\n  Stored:   {}\n  Expected: {}\n  Drift:    {}\nRun 'pocket-ledger reconcile' to repair.\n",
        money(report.stored_balance),
        money(report.expected_balance),
        money(report.drift)
    )
}
