//! Subject repository.

use std::sync::Arc;

use crate::entities::{Subject, subject};
use rapport_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Subject repository for database operations.
#[derive(Clone)]
pub struct SubjectRepository {
    db: Arc<DatabaseConnection>,
}

impl SubjectRepository {
    /// Create a new subject repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new subject.
    pub async fn create(&self, model: subject::ActiveModel) -> AppResult<subject::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a subject by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<subject::Model>> {
        Subject::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a subject by ID, erroring if absent.
    pub async fn get_by_id(&self, id: &str) -> AppResult<subject::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subject {id} not found")))
    }

    /// Find a subject by exact name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<subject::Model>> {
        Subject::find()
            .filter(subject::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all subjects, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<subject::Model>> {
        Subject::find()
            .order_by_desc(subject::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all subjects.
    pub async fn count_all(&self) -> AppResult<u64> {
        Subject::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::subject::SubjectKind;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_subject(id: &str, name: &str) -> subject::Model {
        subject::Model {
            id: id.to_string(),
            name: name.to_string(),
            kind: SubjectKind::Company,
            description: None,
            location: None,
            verified: false,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_list_all() {
        let s1 = create_test_subject("subject1", "Accra Mall");
        let s2 = create_test_subject("subject2", "MTN Ghana");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[s1, s2]])
                .into_connection(),
        );

        let repo = SubjectRepository::new(db);
        let result = repo.list_all().await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<subject::Model>::new()])
                .into_connection(),
        );

        let repo = SubjectRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
