//! Resilience wrapper composing a primary and a fallback store.
//!
//! Infrastructure failures on the primary (database down, external service
//! errors) are absorbed: the operation is logged and re-run against the
//! fallback. Domain outcomes — not found, validation, auth, conflicts —
//! propagate unchanged, so degraded mode never rewrites business decisions.

use std::collections::HashMap;
use std::sync::Arc;

use rapport_common::AppResult;

use crate::entities::{evidence, moderation_log, reply, report, subject, user};

use super::{
    AdminStats, NewEvidence, NewModerationLog, NewReply, NewReport, NewSubject, ReplyPatch,
    ReportFilter, ReportPatch, ReportStore, ReportView, SubjectStats,
};

/// Store wrapper that degrades to a fallback on infrastructure errors.
pub struct ResilientStore {
    primary: Arc<dyn ReportStore>,
    fallback: Arc<dyn ReportStore>,
}

impl ResilientStore {
    /// Compose a primary store with a fallback.
    #[must_use]
    pub fn new(primary: Arc<dyn ReportStore>, fallback: Arc<dyn ReportStore>) -> Self {
        Self { primary, fallback }
    }
}

/// Run an operation on the primary store, degrading to the fallback when the
/// error is recoverable. Arguments are re-evaluated for the fallback call, so
/// owned inputs must be passed as clones.
macro_rules! or_fallback {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self.primary.$method($($arg),*).await {
            Err(e) if e.is_recoverable() => {
                tracing::warn!(
                    error = %e,
                    op = stringify!($method),
                    "primary store unavailable, serving from fallback"
                );
                $self.fallback.$method($($arg),*).await
            }
            other => other,
        }
    };
}

#[async_trait::async_trait]
impl ReportStore for ResilientStore {
    async fn list_subjects(&self) -> AppResult<Vec<subject::Model>> {
        or_fallback!(self, list_subjects())
    }

    async fn find_subject(&self, id: &str) -> AppResult<Option<subject::Model>> {
        or_fallback!(self, find_subject(id))
    }

    async fn create_subject(&self, new: NewSubject) -> AppResult<subject::Model> {
        or_fallback!(self, create_subject(new.clone()))
    }

    async fn find_subject_by_name(&self, name: &str) -> AppResult<Option<subject::Model>> {
        or_fallback!(self, find_subject_by_name(name))
    }

    async fn list_reports(&self, filter: &ReportFilter) -> AppResult<Vec<ReportView>> {
        or_fallback!(self, list_reports(filter))
    }

    async fn create_report(&self, new: NewReport) -> AppResult<report::Model> {
        or_fallback!(self, create_report(new.clone()))
    }

    async fn update_report(
        &self,
        id: &str,
        patch: ReportPatch,
    ) -> AppResult<Option<report::Model>> {
        or_fallback!(self, update_report(id, patch.clone()))
    }

    async fn find_report(&self, id: &str) -> AppResult<Option<report::Model>> {
        or_fallback!(self, find_report(id))
    }

    async fn approve_all_pending(&self) -> AppResult<u64> {
        or_fallback!(self, approve_all_pending())
    }

    async fn create_reply(&self, new: NewReply) -> AppResult<reply::Model> {
        or_fallback!(self, create_reply(new.clone()))
    }

    async fn update_reply(&self, id: &str, patch: ReplyPatch) -> AppResult<Option<reply::Model>> {
        or_fallback!(self, update_reply(id, patch.clone()))
    }

    async fn find_reply(&self, id: &str) -> AppResult<Option<reply::Model>> {
        or_fallback!(self, find_reply(id))
    }

    async fn list_pending_replies(&self) -> AppResult<Vec<reply::Model>> {
        or_fallback!(self, list_pending_replies())
    }

    async fn create_evidence(&self, new: NewEvidence) -> AppResult<evidence::Model> {
        or_fallback!(self, create_evidence(new.clone()))
    }

    async fn list_evidence(&self, report_id: &str) -> AppResult<Vec<evidence::Model>> {
        or_fallback!(self, list_evidence(report_id))
    }

    async fn record_moderation(
        &self,
        new: NewModerationLog,
    ) -> AppResult<moderation_log::Model> {
        or_fallback!(self, record_moderation(new.clone()))
    }

    async fn find_user(&self, id: &str) -> AppResult<Option<user::Model>> {
        or_fallback!(self, find_user(id))
    }

    async fn report_stats(&self) -> AppResult<HashMap<String, SubjectStats>> {
        or_fallback!(self, report_stats())
    }

    async fn admin_stats(&self) -> AppResult<AdminStats> {
        or_fallback!(self, admin_stats())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::report::ReportKind;
    use crate::store::MemoryStore;
    use rapport_common::AppError;

    /// A primary store that fails every operation with one error shape.
    struct FailingStore {
        recoverable: bool,
    }

    impl FailingStore {
        fn fail<T>(&self) -> AppResult<T> {
            if self.recoverable {
                Err(AppError::Database("connection refused".to_string()))
            } else {
                Err(AppError::Validation("rejected by primary".to_string()))
            }
        }
    }

    #[async_trait::async_trait]
    impl ReportStore for FailingStore {
        async fn list_subjects(&self) -> AppResult<Vec<subject::Model>> {
            self.fail()
        }
        async fn find_subject(&self, _id: &str) -> AppResult<Option<subject::Model>> {
            self.fail()
        }
        async fn create_subject(&self, _new: NewSubject) -> AppResult<subject::Model> {
            self.fail()
        }
        async fn find_subject_by_name(&self, _name: &str) -> AppResult<Option<subject::Model>> {
            self.fail()
        }
        async fn list_reports(&self, _filter: &ReportFilter) -> AppResult<Vec<ReportView>> {
            self.fail()
        }
        async fn create_report(&self, _new: NewReport) -> AppResult<report::Model> {
            self.fail()
        }
        async fn update_report(
            &self,
            _id: &str,
            _patch: ReportPatch,
        ) -> AppResult<Option<report::Model>> {
            self.fail()
        }
        async fn find_report(&self, _id: &str) -> AppResult<Option<report::Model>> {
            self.fail()
        }
        async fn approve_all_pending(&self) -> AppResult<u64> {
            self.fail()
        }
        async fn create_reply(&self, _new: NewReply) -> AppResult<reply::Model> {
            self.fail()
        }
        async fn update_reply(
            &self,
            _id: &str,
            _patch: ReplyPatch,
        ) -> AppResult<Option<reply::Model>> {
            self.fail()
        }
        async fn find_reply(&self, _id: &str) -> AppResult<Option<reply::Model>> {
            self.fail()
        }
        async fn list_pending_replies(&self) -> AppResult<Vec<reply::Model>> {
            self.fail()
        }
        async fn create_evidence(&self, _new: NewEvidence) -> AppResult<evidence::Model> {
            self.fail()
        }
        async fn list_evidence(&self, _report_id: &str) -> AppResult<Vec<evidence::Model>> {
            self.fail()
        }
        async fn record_moderation(
            &self,
            _new: NewModerationLog,
        ) -> AppResult<moderation_log::Model> {
            self.fail()
        }
        async fn find_user(&self, _id: &str) -> AppResult<Option<user::Model>> {
            self.fail()
        }
        async fn report_stats(&self) -> AppResult<HashMap<String, SubjectStats>> {
            self.fail()
        }
        async fn admin_stats(&self) -> AppResult<AdminStats> {
            self.fail()
        }
    }

    #[tokio::test]
    async fn test_recoverable_error_falls_back() {
        let store = ResilientStore::new(
            Arc::new(FailingStore { recoverable: true }),
            Arc::new(MemoryStore::seeded()),
        );

        let subjects = store.list_subjects().await.unwrap();
        assert_eq!(subjects.len(), 5);
    }

    #[tokio::test]
    async fn test_mutation_falls_back() {
        let store = ResilientStore::new(
            Arc::new(FailingStore { recoverable: true }),
            Arc::new(MemoryStore::empty()),
        );

        let report = store
            .create_report(NewReport {
                subject_id: "subject-1".to_string(),
                reporter_id: "user-demo".to_string(),
                kind: ReportKind::Positive,
                category: "Other".to_string(),
                title: "Fell back".to_string(),
                description: "text".to_string(),
                original_description: "text".to_string(),
                is_anonymous: false,
            })
            .await
            .unwrap();

        assert_eq!(report.title, "Fell back");
    }

    #[tokio::test]
    async fn test_domain_error_propagates() {
        let store = ResilientStore::new(
            Arc::new(FailingStore { recoverable: false }),
            Arc::new(MemoryStore::seeded()),
        );

        let result = store.list_subjects().await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
