//! Object storage abstraction for evidence file uploads.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Uploaded file metadata.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Storage key (path or object key).
    pub key: String,
    /// Public URL to access the file.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME content type.
    pub content_type: String,
    /// MD5 hash of the file.
    pub md5: String,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Upload a file.
    async fn upload(&self, key: &str, data: &[u8], content_type: &str)
    -> AppResult<UploadedFile>;

    /// Delete a file.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;

    /// Check if a file exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self { base_path, base_url }
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn upload(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> AppResult<UploadedFile> {
        let path = self.base_path.join(key);

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::ExternalService(format!("Failed to create directory: {e}")))?;
        }

        // Write file
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to write file: {e}")))?;

        let md5 = format!("{:x}", md5::compute(data));

        Ok(UploadedFile {
            key: key.to_string(),
            url: self.public_url(key),
            size: data.len() as u64,
            content_type: content_type.to_string(),
            md5,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.base_path.join(key);
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| AppError::ExternalService(format!("Failed to delete file: {e}")))?;
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.base_path.join(key);
        Ok(path.exists())
    }
}

/// Replace every character outside `[A-Za-z0-9.-]` with an underscore.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Generate a collision-resistant storage key scoped under the report.
#[must_use]
pub fn generate_evidence_key(report_id: &str, original_name: &str) -> String {
    use chrono::Utc;

    let timestamp = Utc::now().timestamp_millis();
    let sanitized = sanitize_file_name(original_name);

    // Extract extension from the sanitized name
    let extension = sanitized
        .rfind('.')
        .filter(|&pos| pos > 0 && pos < sanitized.len() - 1)
        .map(|pos| &sanitized[pos + 1..])
        .filter(|ext| ext.len() <= 10 && !ext.is_empty())
        .unwrap_or("bin");

    format!("{}/{}_{}.{}", report_id, timestamp, uuid::Uuid::new_v4(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("receipt (1).pdf"), "receipt__1_.pdf");
        assert_eq!(sanitize_file_name("photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_file_name("my évidence!.png"), "my__vidence_.png");
    }

    #[test]
    fn test_generate_evidence_key() {
        let key = generate_evidence_key("report123", "photo.jpg");
        assert!(key.starts_with("report123/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn test_generate_evidence_key_no_extension() {
        let key = generate_evidence_key("report123", "file");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn test_generate_evidence_key_unique() {
        let a = generate_evidence_key("r1", "a.png");
        let b = generate_evidence_key("r1", "a.png");
        assert_ne!(a, b);
    }
}
