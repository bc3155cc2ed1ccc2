//! Evidence intake service.

use std::sync::Arc;

use rapport_common::{
    AppError, AppResult, StorageBackend, generate_evidence_key,
};
use rapport_db::entities::evidence;
use rapport_db::store::{NewEvidence, ReportStore};

/// Maximum number of evidence files per report.
pub const MAX_FILES_PER_REPORT: usize = 5;

/// Maximum evidence file size (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Accepted evidence MIME types.
pub const ALLOWED_FILE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "application/pdf"];

/// One file in an upload batch.
#[derive(Debug, Clone)]
pub struct EvidenceUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// File bytes.
    pub data: Vec<u8>,
}

/// Service for attaching evidence files to reports.
#[derive(Clone)]
pub struct EvidenceService {
    store: Arc<dyn ReportStore>,
    storage: Arc<dyn StorageBackend>,
}

impl EvidenceService {
    /// Create a new evidence service.
    #[must_use]
    pub fn new(store: Arc<dyn ReportStore>, storage: Arc<dyn StorageBackend>) -> Self {
        Self { store, storage }
    }

    /// Attach a batch of files to a report.
    ///
    /// The whole batch is validated before anything touches storage or the
    /// store. Files then upload sequentially; the first failure aborts the
    /// remaining uploads and surfaces the error. Evidence records already
    /// created for earlier files in the batch are not rolled back.
    pub async fn attach(
        &self,
        report_id: &str,
        files: Vec<EvidenceUpload>,
    ) -> AppResult<Vec<evidence::Model>> {
        validate_batch(&files)?;

        if self.store.find_report(report_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Report {report_id} not found")));
        }

        let existing = self.store.list_evidence(report_id).await?.len();
        if existing + files.len() > MAX_FILES_PER_REPORT {
            return Err(AppError::Validation(format!(
                "A report can carry at most {MAX_FILES_PER_REPORT} evidence files"
            )));
        }

        let mut records = Vec::with_capacity(files.len());

        for file in files {
            let key = generate_evidence_key(report_id, &file.file_name);
            let uploaded = self
                .storage
                .upload(&key, &file.data, &file.content_type)
                .await?;

            let record = self
                .store
                .create_evidence(NewEvidence {
                    report_id: report_id.to_string(),
                    file_path: uploaded.url,
                    file_name: file.file_name,
                    file_type: file.content_type,
                })
                .await?;

            records.push(record);
        }

        Ok(records)
    }
}

/// Validate an upload batch before any store or storage call.
pub fn validate_batch(files: &[EvidenceUpload]) -> AppResult<()> {
    if files.is_empty() {
        return Err(AppError::Validation("No files supplied".to_string()));
    }

    if files.len() > MAX_FILES_PER_REPORT {
        return Err(AppError::Validation(format!(
            "At most {MAX_FILES_PER_REPORT} files may be uploaded per report"
        )));
    }

    for file in files {
        if !ALLOWED_FILE_TYPES.contains(&file.content_type.as_str()) {
            return Err(AppError::Validation(format!(
                "Unsupported file type {}: only images and PDF are accepted",
                file.content_type
            )));
        }
        if file.data.len() > MAX_FILE_SIZE {
            return Err(AppError::Validation(format!(
                "{} exceeds the 10MB size limit",
                file.file_name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rapport_common::UploadedFile;
    use rapport_db::store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Storage stub that counts uploads and optionally fails from the Nth.
    struct StubStorage {
        uploads: AtomicUsize,
        fail_from: Option<usize>,
    }

    impl StubStorage {
        fn new(fail_from: Option<usize>) -> Self {
            Self {
                uploads: AtomicUsize::new(0),
                fail_from,
            }
        }
    }

    #[async_trait::async_trait]
    impl StorageBackend for StubStorage {
        async fn upload(
            &self,
            key: &str,
            data: &[u8],
            content_type: &str,
        ) -> AppResult<UploadedFile> {
            let n = self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail_from.is_some_and(|limit| n >= limit) {
                return Err(AppError::ExternalService("upload failed".to_string()));
            }
            Ok(UploadedFile {
                key: key.to_string(),
                url: format!("/files/{key}"),
                size: data.len() as u64,
                content_type: content_type.to_string(),
                md5: String::new(),
            })
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("/files/{key}")
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Ok(true)
        }
    }

    fn upload(name: &str) -> EvidenceUpload {
        EvidenceUpload {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0; 128],
        }
    }

    #[test]
    fn test_validate_rejects_six_files() {
        let files: Vec<_> = (0..6).map(|i| upload(&format!("f{i}.jpg"))).collect();
        assert!(matches!(
            validate_batch(&files),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let mut file = upload("big.jpg");
        file.data = vec![0; MAX_FILE_SIZE + 1];
        assert!(matches!(
            validate_batch(&[file]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unsupported_type() {
        let mut file = upload("notes.txt");
        file.content_type = "text/plain".to_string();
        assert!(matches!(
            validate_batch(&[file]),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_attach_creates_records() {
        let store = Arc::new(MemoryStore::seeded());
        let service = EvidenceService::new(store.clone(), Arc::new(StubStorage::new(None)));

        let records = service
            .attach("report-1", vec![upload("a.jpg"), upload("b.jpg")])
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(store.list_evidence("report-1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_attach_fail_fast_keeps_earlier_records() {
        let store = Arc::new(MemoryStore::seeded());
        let service = EvidenceService::new(store.clone(), Arc::new(StubStorage::new(Some(1))));

        let result = service
            .attach("report-1", vec![upload("a.jpg"), upload("b.jpg"), upload("c.jpg")])
            .await;

        assert!(matches!(result, Err(AppError::ExternalService(_))));
        // First file succeeded and its record remains; the rest were aborted.
        assert_eq!(store.list_evidence("report-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_attach_unknown_report() {
        let service = EvidenceService::new(
            Arc::new(MemoryStore::empty()),
            Arc::new(StubStorage::new(None)),
        );

        let result = service.attach("missing", vec![upload("a.jpg")]).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
