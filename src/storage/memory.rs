//! In-memory key-value store
//!
//! Clones share the same underlying map, so several ledgers can be pointed at
//! one store the way several screens share one device store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

use super::KeyValueStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Result<HashMap<String, String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::new(format!("Failed to acquire lock: {}", e)))?;
        Ok(entries.clone())
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::new(format!("Failed to acquire lock: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::new(format!("Failed to acquire lock: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
