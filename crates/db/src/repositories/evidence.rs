//! Evidence repository.

use std::sync::Arc;

use crate::entities::{Evidence, evidence};
use rapport_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Evidence repository for database operations.
#[derive(Clone)]
pub struct EvidenceRepository {
    db: Arc<DatabaseConnection>,
}

impl EvidenceRepository {
    /// Create a new evidence repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new evidence record.
    pub async fn create(&self, model: evidence::ActiveModel) -> AppResult<evidence::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List evidence for a report, oldest first (upload order).
    pub async fn list_by_report(&self, report_id: &str) -> AppResult<Vec<evidence::Model>> {
        Evidence::find()
            .filter(evidence::Column::ReportId.eq(report_id))
            .order_by_asc(evidence::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count evidence attached to a report.
    pub async fn count_by_report(&self, report_id: &str) -> AppResult<u64> {
        Evidence::find()
            .filter(evidence::Column::ReportId.eq(report_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::test_evidence;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_list_by_report() {
        let e1 = test_evidence("evidence1", "report1");
        let e2 = test_evidence("evidence2", "report1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[e1, e2]])
                .into_connection(),
        );

        let repo = EvidenceRepository::new(db);
        let result = repo.list_by_report("report1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
