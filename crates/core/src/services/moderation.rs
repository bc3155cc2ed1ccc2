//! Moderation workflow service.
//!
//! State machine per report: pending -> approved (approve), pending ->
//! rejected (reject), rejected -> pending (restore). Approved is terminal.
//! Replies move pending -> approved/rejected with no restore.

use std::sync::Arc;

use rapport_common::{AppError, AppResult};
use rapport_db::entities::{
    moderation_log::ModerationAction,
    reply,
    report::{self, ModerationStatus},
};
use rapport_db::store::{
    NewModerationLog, ReplyPatch, ReportFilter, ReportPatch, ReportStore, ReportView,
};
use serde::Deserialize;

/// A moderator's decision on a pending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Publish the item.
    Approve,
    /// Keep the item off public view.
    Reject,
}

impl Decision {
    const fn status(self) -> ModerationStatus {
        match self {
            Self::Approve => ModerationStatus::Approved,
            Self::Reject => ModerationStatus::Rejected,
        }
    }

    const fn action(self) -> ModerationAction {
        match self {
            Self::Approve => ModerationAction::Approve,
            Self::Reject => ModerationAction::Reject,
        }
    }
}

/// Service driving the approve/reject/restore workflow.
#[derive(Clone)]
pub struct ModerationService {
    store: Arc<dyn ReportStore>,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Decide a pending report.
    ///
    /// Only pending reports can be decided: if another moderator got there
    /// first the call fails with a conflict instead of silently overwriting
    /// the earlier decision. Notes land on the audit record, not the report.
    pub async fn moderate_report(
        &self,
        moderator_id: &str,
        report_id: &str,
        decision: Decision,
        notes: Option<String>,
    ) -> AppResult<report::Model> {
        self.require_moderator(moderator_id).await?;

        let current = self
            .store
            .find_report(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;

        if current.status != ModerationStatus::Pending {
            return Err(AppError::Conflict("Report already decided".to_string()));
        }

        let updated = self
            .store
            .update_report(
                report_id,
                ReportPatch {
                    status: Some(decision.status()),
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;

        self.store
            .record_moderation(NewModerationLog {
                report_id: report_id.to_string(),
                moderator_id: moderator_id.to_string(),
                action: decision.action(),
                notes,
            })
            .await?;

        tracing::info!(
            report_id,
            moderator_id,
            decision = ?decision,
            "report moderated"
        );

        Ok(updated)
    }

    /// Decide a pending reply.
    pub async fn moderate_reply(
        &self,
        moderator_id: &str,
        reply_id: &str,
        decision: Decision,
    ) -> AppResult<reply::Model> {
        self.require_moderator(moderator_id).await?;

        let current = self
            .store
            .find_reply(reply_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reply {reply_id} not found")))?;

        if current.status != ModerationStatus::Pending {
            return Err(AppError::Conflict("Reply already decided".to_string()));
        }

        self.store
            .update_reply(
                reply_id,
                ReplyPatch {
                    status: Some(decision.status()),
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reply {reply_id} not found")))
    }

    /// Restore a rejected report to the moderation queue.
    ///
    /// Only valid from the rejected state.
    pub async fn restore_report(
        &self,
        moderator_id: &str,
        report_id: &str,
    ) -> AppResult<report::Model> {
        self.require_moderator(moderator_id).await?;

        let current = self
            .store
            .find_report(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;

        if current.status != ModerationStatus::Rejected {
            return Err(AppError::Conflict(
                "Only rejected reports can be restored".to_string(),
            ));
        }

        let updated = self
            .store
            .update_report(
                report_id,
                ReportPatch {
                    status: Some(ModerationStatus::Pending),
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;

        self.store
            .record_moderation(NewModerationLog {
                report_id: report_id.to_string(),
                moderator_id: moderator_id.to_string(),
                action: ModerationAction::Restore,
                notes: None,
            })
            .await?;

        Ok(updated)
    }

    /// Approve every currently pending report in one bulk pass.
    ///
    /// Best-effort: submissions arriving mid-operation may or may not be
    /// included. No per-report audit rows are written for the bulk path.
    pub async fn approve_all_pending(&self, moderator_id: &str) -> AppResult<u64> {
        self.require_moderator(moderator_id).await?;

        let affected = self.store.approve_all_pending().await?;
        tracing::info!(moderator_id, affected, "bulk-approved pending reports");

        Ok(affected)
    }

    /// Reports awaiting moderation, newest first, hydrated for review.
    pub async fn pending_reports(&self) -> AppResult<Vec<ReportView>> {
        self.store
            .list_reports(&ReportFilter::with_status(ModerationStatus::Pending))
            .await
    }

    /// Replies awaiting moderation, newest first.
    pub async fn pending_replies(&self) -> AppResult<Vec<reply::Model>> {
        self.store.list_pending_replies().await
    }

    async fn require_moderator(&self, moderator_id: &str) -> AppResult<()> {
        let user = self
            .store
            .find_user(moderator_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Only moderators can do this".to_string()))?;

        if !user.is_admin {
            return Err(AppError::Forbidden(
                "Only moderators can do this".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rapport_db::store::MemoryStore;

    // Seeded store: report-4 and report-5 pending, user-admin is a moderator.

    fn service(store: Arc<MemoryStore>) -> ModerationService {
        ModerationService::new(store)
    }

    #[tokio::test]
    async fn test_approve_pending_report() {
        let store = Arc::new(MemoryStore::seeded());
        let service = service(store);

        let updated = service
            .moderate_report("user-admin", "report-4", Decision::Approve, None)
            .await
            .unwrap();

        assert_eq!(updated.status, ModerationStatus::Approved);
    }

    #[tokio::test]
    async fn test_second_decision_conflicts() {
        let store = Arc::new(MemoryStore::seeded());
        let service = service(store);

        service
            .moderate_report("user-admin", "report-4", Decision::Approve, None)
            .await
            .unwrap();

        let result = service
            .moderate_report("user-admin", "report-4", Decision::Approve, None)
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_non_moderator_forbidden() {
        let store = Arc::new(MemoryStore::seeded());
        let service = service(store);

        let result = service
            .moderate_report("user-demo", "report-4", Decision::Approve, None)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_restore_requires_rejected() {
        let store = Arc::new(MemoryStore::seeded());
        let service = service(store);

        // Pending report cannot be restored
        let result = service.restore_report("user-admin", "report-4").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // Rejected report can
        service
            .moderate_report("user-admin", "report-4", Decision::Reject, None)
            .await
            .unwrap();
        let restored = service
            .restore_report("user-admin", "report-4")
            .await
            .unwrap();

        assert_eq!(restored.status, ModerationStatus::Pending);
    }

    #[tokio::test]
    async fn test_approve_all_pending() {
        let store = Arc::new(MemoryStore::seeded());
        let service = service(store);

        let affected = service.approve_all_pending("user-admin").await.unwrap();
        assert_eq!(affected, 2);

        let still_pending = service.pending_reports().await.unwrap();
        assert!(still_pending.is_empty());
    }

    #[tokio::test]
    async fn test_moderate_missing_report() {
        let store = Arc::new(MemoryStore::seeded());
        let service = service(store);

        let result = service
            .moderate_report("user-admin", "missing", Decision::Approve, None)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
