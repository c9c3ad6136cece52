//! Ledger codec
//!
//! Converts balances and transaction histories to and from the string values
//! held in the key-value store. All functions are pure.
//!
//! Scalars (`balance`, `deposits`) are plain decimal strings such as
//! `"1042.50"`. The history is a JSON array, most recent first, of
//!
//! ```json
//! {"id": "...", "amount": 20.0, "category": "Food", "description": "lunch",
//!  "date": "2025-01-15T12:30:00.000Z", "type": "expense"}
//! ```
//!
//! where `amount` is the magnitude and `type` carries the sign.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionId, TransactionKind};

use super::{BALANCE_KEY, DEPOSITS_KEY, TRANSACTIONS_KEY};

/// Persisted shape of one transaction; field order is the wire order
#[derive(Debug, Serialize, Deserialize)]
struct TransactionRecord {
    id: String,
    amount: f64,
    category: String,
    description: String,
    date: String,
    #[serde(rename = "type")]
    kind: TransactionKind,
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.to_string(),
            amount: txn.amount.abs().to_major(),
            category: txn.category.clone(),
            description: txn.description.clone(),
            date: txn.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            kind: txn.kind(),
        }
    }
}

impl TransactionRecord {
    fn into_transaction(self, index: usize) -> LedgerResult<Transaction> {
        let corrupt = |reason: String| {
            LedgerError::corrupt(TRANSACTIONS_KEY, format!("record {}: {}", index, reason))
        };

        let id = TransactionId::parse(&self.id).ok_or_else(|| corrupt("empty id".into()))?;

        let magnitude = Money::from_major(self.amount)
            .ok_or_else(|| corrupt(format!("amount {} is not representable", self.amount)))?;

        let created_at = DateTime::parse_from_rfc3339(&self.date)
            .map_err(|e| corrupt(format!("invalid date {:?}: {}", self.date, e)))?
            .with_timezone(&Utc)
            .trunc_subsecs(3);

        Ok(Transaction {
            id,
            amount: self.kind.signed(magnitude),
            category: self.category,
            description: self.description,
            created_at,
        })
    }
}

/// Encode a balance (or any ledger scalar) as a decimal string
pub fn encode_balance(balance: Money) -> String {
    balance.to_string()
}

/// Decode the persisted balance; an absent value is zero
pub fn decode_balance(raw: Option<&str>) -> LedgerResult<Money> {
    decode_scalar(BALANCE_KEY, raw)
}

/// Decode the persisted deposit total; an absent value is zero
pub fn decode_deposit_total(raw: Option<&str>) -> LedgerResult<Money> {
    decode_scalar(DEPOSITS_KEY, raw)
}

fn decode_scalar(key: &str, raw: Option<&str>) -> LedgerResult<Money> {
    match raw {
        None => Ok(Money::zero()),
        Some(s) => Money::from_decimal_str(s.trim())
            .map_err(|e| LedgerError::corrupt(key, e.to_string())),
    }
}

/// Encode the full history as a JSON array
///
/// Fails with `InvalidInput` if an amount exceeds [`Money::MAX_AMOUNT`],
/// since it could not be read back unchanged.
pub fn encode_history(history: &[Transaction]) -> LedgerResult<String> {
    if let Some(txn) = history.iter().find(|txn| !txn.amount.is_within_limit()) {
        return Err(LedgerError::InvalidInput(format!(
            "amount {} of transaction {} exceeds the storable limit of {}",
            txn.amount,
            txn.id,
            Money::MAX_AMOUNT
        )));
    }

    let records: Vec<TransactionRecord> = history.iter().map(TransactionRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Decode the persisted history; an absent value is an empty history
pub fn decode_history(raw: Option<&str>) -> LedgerResult<Vec<Transaction>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let records: Vec<TransactionRecord> = serde_json::from_str(raw)
        .map_err(|e| LedgerError::corrupt(TRANSACTIONS_KEY, e.to_string()))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_transaction(index))
        .collect()
}
