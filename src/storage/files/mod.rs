//! Local file system storage for uploaded documents.
//!
//! Files are stored under a configured base directory, keyed by UUID and
//! fanned out into two-character prefix subdirectories. Metadata (original
//! filename, content type, size, uploader) lives in the `documents` table,
//! not on disk.

use crate::utils::error::{AppError, Result};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

/// Local file storage
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage instance
    pub async fn new(base_path: &str) -> Result<Self> {
        let path = PathBuf::from(base_path);

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                AppError::file_storage(format!("Failed to create storage directory: {}", e))
            })?;
        }

        info!("Local file storage initialized at: {}", path.display());
        Ok(Self { base_path: path })
    }

    /// Store file content, returning the generated storage key.
    pub async fn store(&self, content: &[u8]) -> Result<String> {
        let file_id = Uuid::new_v4().to_string();
        let file_path = self.file_path(&file_id);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::file_storage(format!("Failed to create directory: {}", e))
            })?;
        }

        let mut file = fs::File::create(&file_path)
            .await
            .map_err(|e| AppError::file_storage(format!("Failed to create file: {}", e)))?;

        file.write_all(content)
            .await
            .map_err(|e| AppError::file_storage(format!("Failed to write file: {}", e)))?;

        debug!("File stored: {} ({} bytes)", file_id, content.len());
        Ok(file_id)
    }

    /// Retrieve file content by storage key.
    pub async fn get(&self, file_id: &str) -> Result<Vec<u8>> {
        let file_path = self.file_path(file_id);

        if !file_path.exists() {
            return Err(AppError::not_found(format!("File not found: {}", file_id)));
        }

        fs::read(&file_path)
            .await
            .map_err(|e| AppError::file_storage(format!("Failed to read file: {}", e)))
    }

    /// Delete a stored file. Missing files are not an error.
    pub async fn delete(&self, file_id: &str) -> Result<()> {
        let file_path = self.file_path(file_id);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| AppError::file_storage(format!("Failed to delete file: {}", e)))?;
            debug!("File deleted: {}", file_id);
        }

        Ok(())
    }

    /// Guess a content type from a filename extension.
    pub fn detect_content_type(filename: &str) -> &'static str {
        match filename.rsplit('.').next().map(str::to_ascii_lowercase) {
            Some(ext) => match ext.as_str() {
                "pdf" => "application/pdf",
                "doc" => "application/msword",
                "docx" => {
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                }
                "png" => "image/png",
                "jpg" | "jpeg" => "image/jpeg",
                "gif" => "image/gif",
                "webp" => "image/webp",
                "txt" => "text/plain",
                _ => "application/octet-stream",
            },
            None => "application/octet-stream",
        }
    }

    fn file_path(&self, file_id: &str) -> PathBuf {
        // Fan out by prefix so a single directory never grows unbounded
        let prefix = &file_id[..2.min(file_id.len())];
        self.base_path.join(prefix).join(file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_get_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap()).await.unwrap();

        let key = storage.store(b"contract text").await.unwrap();
        assert_eq!(storage.get(&key).await.unwrap(), b"contract text");

        storage.delete(&key).await.unwrap();
        assert!(storage.get(&key).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap()).await.unwrap();

        assert!(storage.delete("does-not-exist").await.is_ok());
    }

    #[test]
    fn test_detect_content_type() {
        assert_eq!(LocalStorage::detect_content_type("brief.PDF"), "application/pdf");
        assert_eq!(LocalStorage::detect_content_type("photo.jpeg"), "image/jpeg");
        assert_eq!(
            LocalStorage::detect_content_type("unknown.bin"),
            "application/octet-stream"
        );
        assert_eq!(
            LocalStorage::detect_content_type("no-extension"),
            "application/octet-stream"
        );
    }
}
