//! File-backed key-value store
//!
//! Each key lives in its own file under the data directory, so writing one
//! key never rewrites another. Writes go through [`write_text_atomic`].

use std::path::PathBuf;

use crate::error::StorageError;

use super::file_io::{read_text, write_text_atomic};
use super::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(StorageError::new(format!("Invalid store key: {:?}", key)));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        read_text(&path).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        write_text_atomic(&path, value).await?;
        tracing::debug!(key, bytes = value.len(), "wrote store entry");
        Ok(())
    }
}
