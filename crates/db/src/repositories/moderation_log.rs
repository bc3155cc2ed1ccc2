//! Moderation log repository.

use std::sync::Arc;

use crate::entities::{ModerationLog, moderation_log};
use rapport_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Moderation log repository for database operations.
#[derive(Clone)]
pub struct ModerationLogRepository {
    db: Arc<DatabaseConnection>,
}

impl ModerationLogRepository {
    /// Create a new moderation log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record a moderation action.
    pub async fn create(
        &self,
        model: moderation_log::ActiveModel,
    ) -> AppResult<moderation_log::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the audit history for a report, newest first.
    pub async fn list_by_report(&self, report_id: &str) -> AppResult<Vec<moderation_log::Model>> {
        ModerationLog::find()
            .filter(moderation_log::Column::ReportId.eq(report_id))
            .order_by_desc(moderation_log::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
