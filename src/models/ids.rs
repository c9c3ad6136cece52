//! Transaction identifiers
//!
//! An id is `<unix-millis>-<8 hex chars>`: the prefix orders ids by creation
//! time, the random suffix keeps ids created in the same millisecond apart.
//! Ids read back from storage are accepted in any non-empty form, since older
//! records carry a bare millisecond timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a fresh id stamped with the given creation time
    pub fn for_timestamp(created_at: &DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", created_at.timestamp_millis(), &suffix[..8]))
    }

    /// Wrap an existing id string; returns `None` if it is blank
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(Self(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The creation time in milliseconds encoded in the id, if present
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0.split('-').next()?.parse().ok()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TransactionId {
    type Err = InvalidTransactionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(InvalidTransactionId)
    }
}

/// Returned when parsing a blank transaction id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransactionId;

impl fmt::Display for InvalidTransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transaction id must not be empty")
    }
}

impl std::error::Error for InvalidTransactionId {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_carries_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let id = TransactionId::for_timestamp(&at);
        assert_eq!(id.timestamp_millis(), Some(at.timestamp_millis()));
        assert_eq!(id.as_str().len(), at.timestamp_millis().to_string().len() + 9);
    }

    #[test]
    fn test_ids_in_same_millisecond_differ() {
        let at = Utc::now();
        let a = TransactionId::for_timestamp(&at);
        let b = TransactionId::for_timestamp(&at);
        assert_ne!(a, b);
    }

    #[test]
    fn test_legacy_id_accepted() {
        let id: TransactionId = "1718000000000".parse().unwrap();
        assert_eq!(id.timestamp_millis(), Some(1_718_000_000_000));
        assert!("   ".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = TransactionId::for_timestamp(&Utc::now());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let deserialized: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
