//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;

/// Read a whole file as text, returning `None` if it doesn't exist
pub async fn read_text<P: AsRef<Path>>(path: P) -> Result<Option<String>, StorageError> {
    let path = path.as_ref();

    match fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::new(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Write text to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub async fn write_text_atomic<P: AsRef<Path>>(
    path: P,
    contents: &str,
) -> Result<(), StorageError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .await
        .map_err(|e| StorageError::new(format!("Failed to create temp file: {}", e)))?;

    file.write_all(contents.as_bytes())
        .await
        .map_err(|e| StorageError::new(format!("Failed to write data: {}", e)))?;

    file.flush()
        .await
        .map_err(|e| StorageError::new(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    file.sync_all()
        .await
        .map_err(|e| StorageError::new(format!("Failed to sync data: {}", e)))?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(StorageError::new(format!("Failed to rename temp file: {}", e)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing");

        assert_eq!(read_text(&path).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("balance");

        write_text_atomic(&path, "1042.50").await.unwrap();
        assert_eq!(read_text(&path).await.unwrap().as_deref(), Some("1042.50"));
    }

    #[tokio::test]
    async fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("balance");

        write_text_atomic(&path, "1.00").await.unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("balance.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("balance");

        write_text_atomic(&path, "0.00").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_read_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_text(temp_dir.path()).await.is_err());
    }
}
