//! Report repository.

use std::sync::Arc;

use crate::entities::{
    Report,
    report::{self, ModerationStatus},
};
use crate::store::ReportFilter;
use rapport_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

/// Report repository for database operations.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new report.
    pub async fn create(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<report::Model>> {
        Report::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a report.
    pub async fn update(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List reports matching the filter, newest first.
    ///
    /// Each filter field, if present, narrows results by exact match.
    pub async fn list(&self, filter: &ReportFilter) -> AppResult<Vec<report::Model>> {
        let mut query = Report::find().order_by_desc(report::Column::CreatedAt);

        if let Some(ref subject_id) = filter.subject_id {
            query = query.filter(report::Column::SubjectId.eq(subject_id.as_str()));
        }
        if let Some(ref status) = filter.status {
            query = query.filter(report::Column::Status.eq(status.clone()));
        }
        if let Some(ref reporter_id) = filter.reporter_id {
            query = query.filter(report::Column::ReporterId.eq(reporter_id.as_str()));
        }
        if let Some(ref kind) = filter.kind {
            query = query.filter(report::Column::Kind.eq(kind.clone()));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Transition every pending report to approved in one bulk update.
    ///
    /// Returns the number of rows affected. Not atomic with respect to
    /// concurrent submissions.
    pub async fn approve_all_pending(&self) -> AppResult<u64> {
        let result = Report::update_many()
            .col_expr(report::Column::Status, Expr::value(ModerationStatus::Approved))
            .filter(report::Column::Status.eq(ModerationStatus::Pending))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Count all reports.
    pub async fn count_all(&self) -> AppResult<u64> {
        Report::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count reports with the given status.
    pub async fn count_by_status(&self, status: ModerationStatus) -> AppResult<u64> {
        Report::find()
            .filter(report::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the status of a report by ID, returning the updated row.
    pub async fn set_status(
        &self,
        id: &str,
        status: ModerationStatus,
    ) -> AppResult<Option<report::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut model: report::ActiveModel = existing.into();
        model.status = Set(status);

        self.update(model).await.map(Some)
    }
}
