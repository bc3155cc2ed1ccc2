//! Subject service.

use std::sync::Arc;

use rapport_common::{AppError, AppResult};
use rapport_db::entities::subject::{self, SubjectKind};
use rapport_db::store::{NewSubject, ReportStore};
use serde::Deserialize;
use validator::Validate;

/// Input for creating a subject directly (admin or submission flow).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectInput {
    #[validate(length(min = 2, max = 256))]
    pub name: String,
    pub kind: SubjectKind,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 256))]
    pub location: Option<String>,
}

/// Service for listing and creating subjects.
#[derive(Clone)]
pub struct SubjectService {
    store: Arc<dyn ReportStore>,
}

impl SubjectService {
    /// Create a new subject service.
    #[must_use]
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// All subjects, newest first.
    pub async fn list(&self) -> AppResult<Vec<subject::Model>> {
        self.store.list_subjects().await
    }

    /// Get a subject by ID.
    pub async fn get(&self, id: &str) -> AppResult<subject::Model> {
        self.store
            .find_subject(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subject {id} not found")))
    }

    /// Create a subject. Verification starts false and only administrative
    /// action changes it.
    pub async fn create(&self, input: CreateSubjectInput) -> AppResult<subject::Model> {
        input.validate()?;

        if let Some(existing) = self.store.find_subject_by_name(&input.name).await? {
            return Err(AppError::Conflict(format!(
                "Subject \"{}\" already exists",
                existing.name
            )));
        }

        self.store
            .create_subject(NewSubject {
                name: input.name,
                kind: input.kind,
                description: input.description,
                location: input.location,
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rapport_db::store::MemoryStore;

    fn input(name: &str) -> CreateSubjectInput {
        CreateSubjectInput {
            name: name.to_string(),
            kind: SubjectKind::Company,
            description: None,
            location: None,
        }
    }

    #[tokio::test]
    async fn test_create_starts_unverified() {
        let service = SubjectService::new(Arc::new(MemoryStore::empty()));

        let subject = service.create(input("Test Shop")).await.unwrap();
        assert!(!subject.verified);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let service = SubjectService::new(Arc::new(MemoryStore::empty()));

        service.create(input("Test Shop")).await.unwrap();
        let result = service.create(input("Test Shop")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = SubjectService::new(Arc::new(MemoryStore::empty()));

        let result = service.get("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
