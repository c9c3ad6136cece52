//! Transaction display formatting
//!
//! Register-style listing of the history for terminal output.

use crate::models::Transaction;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    format!(
        "{} {:16} {:24} {:>14}",
        txn.created_at.format("%Y-%m-%d %H:%M"),
        truncate(&txn.category, 16),
        truncate(&txn.description, 24),
        txn.amount.format_with_symbol(symbol)
    )
}

/// Format a list of transactions as a register, most recent first
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:16} {:16} {:24} {:>14}\n",
        "Date", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(73));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.created_at.to_rfc3339()));
    output.push_str(&format!("Type:        {}\n", txn.kind()));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Description: {}\n", txn.description));

    output
}

/// Pad or shorten to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{TimeZone, Utc};

    fn lunch() -> Transaction {
        let at = Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap();
        Transaction::with_timestamp(Money::from_cents(-2000), "Food", "lunch", at)
    }

    #[test]
    fn test_row_contains_fields() {
        let row = format_transaction_row(&lunch(), "RM");
        assert!(row.starts_with("2025-01-15 12:30"));
        assert!(row.contains("Food"));
        assert!(row.contains("lunch"));
        assert!(row.ends_with("-RM20.00"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_transaction_register(&[], "RM"), "No transactions found.\n");
    }

    #[test]
    fn test_register_has_header_and_rows() {
        let register = format_transaction_register(&[lunch(), lunch()], "$");
        assert_eq!(register.lines().count(), 4);
        assert!(register.starts_with("Date"));
    }

    #[test]
    fn test_details() {
        let details = format_transaction_details(&lunch(), "RM");
        assert!(details.contains("Type:        Expense"));
        assert!(details.contains("Amount:      -RM20.00"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Makan", 8), "Makan   ");
        assert_eq!(truncate("Ünïcödé description", 10), "Ünïcödé...");
    }
}
