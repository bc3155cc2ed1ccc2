//! Reply repository.

use std::sync::Arc;

use crate::entities::{
    Reply,
    reply,
    report::ModerationStatus,
};
use rapport_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Reply repository for database operations.
#[derive(Clone)]
pub struct ReplyRepository {
    db: Arc<DatabaseConnection>,
}

impl ReplyRepository {
    /// Create a new reply repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new reply.
    pub async fn create(&self, model: reply::ActiveModel) -> AppResult<reply::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a reply by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<reply::Model>> {
        Reply::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a reply.
    pub async fn update(&self, model: reply::ActiveModel) -> AppResult<reply::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List replies for a report, newest first.
    pub async fn list_by_report(&self, report_id: &str) -> AppResult<Vec<reply::Model>> {
        Reply::find()
            .filter(reply::Column::ReportId.eq(report_id))
            .order_by_desc(reply::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List replies with the given status, newest first.
    pub async fn list_by_status(&self, status: ModerationStatus) -> AppResult<Vec<reply::Model>> {
        Reply::find()
            .filter(reply::Column::Status.eq(status))
            .order_by_desc(reply::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::test_reply;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_list_by_status() {
        let r1 = test_reply("reply1", "report1", ModerationStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1]])
                .into_connection(),
        );

        let repo = ReplyRepository::new(db);
        let result = repo.list_by_status(ModerationStatus::Pending).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "reply1");
    }
}
