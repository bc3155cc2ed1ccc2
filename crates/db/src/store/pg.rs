//! Postgres-backed report store.

use std::collections::HashMap;
use std::sync::Arc;

use rapport_common::{AppResult, IdGenerator};
use sea_orm::{DatabaseConnection, Set};

use crate::entities::{
    evidence, moderation_log, reply,
    report::{self, ModerationStatus, ReportKind},
    subject, user,
};
use crate::repositories::{
    EvidenceRepository, ModerationLogRepository, ReplyRepository, ReportRepository,
    SubjectRepository, UserRepository,
};

use super::{
    AdminStats, NewEvidence, NewModerationLog, NewReply, NewReport, NewSubject, ReplyPatch,
    ReportFilter, ReportPatch, ReportStore, ReportView, SubjectStats,
};

/// Report store backed by the relational database.
#[derive(Clone)]
pub struct PgStore {
    subjects: SubjectRepository,
    reports: ReportRepository,
    replies: ReplyRepository,
    evidence: EvidenceRepository,
    moderation_logs: ModerationLogRepository,
    users: UserRepository,
    id_gen: IdGenerator,
}

impl PgStore {
    /// Create a new store over a database connection.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            subjects: SubjectRepository::new(Arc::clone(&db)),
            reports: ReportRepository::new(Arc::clone(&db)),
            replies: ReplyRepository::new(Arc::clone(&db)),
            evidence: EvidenceRepository::new(Arc::clone(&db)),
            moderation_logs: ModerationLogRepository::new(Arc::clone(&db)),
            users: UserRepository::new(db),
            id_gen: IdGenerator::new(),
        }
    }

    /// The underlying user repository, shared with account handling.
    #[must_use]
    pub const fn users(&self) -> &UserRepository {
        &self.users
    }

    async fn hydrate(&self, rows: Vec<report::Model>) -> AppResult<Vec<ReportView>> {
        // Point lookups per row; listings here are small and unpaginated.
        let mut subject_cache: HashMap<String, Option<subject::Model>> = HashMap::new();
        let mut views = Vec::with_capacity(rows.len());

        for row in rows {
            let subject = match subject_cache.get(&row.subject_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self.subjects.find_by_id(&row.subject_id).await?;
                    subject_cache.insert(row.subject_id.clone(), found.clone());
                    found
                }
            };

            let evidence = self.evidence.list_by_report(&row.id).await?;
            let replies = self.replies.list_by_report(&row.id).await?;

            views.push(ReportView {
                report: row,
                subject,
                evidence,
                replies,
            });
        }

        Ok(views)
    }
}

#[async_trait::async_trait]
impl ReportStore for PgStore {
    async fn list_subjects(&self) -> AppResult<Vec<subject::Model>> {
        self.subjects.list_all().await
    }

    async fn find_subject(&self, id: &str) -> AppResult<Option<subject::Model>> {
        self.subjects.find_by_id(id).await
    }

    async fn create_subject(&self, new: NewSubject) -> AppResult<subject::Model> {
        let model = subject::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(new.name),
            kind: Set(new.kind),
            description: Set(new.description),
            location: Set(new.location),
            verified: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.subjects.create(model).await
    }

    async fn find_subject_by_name(&self, name: &str) -> AppResult<Option<subject::Model>> {
        self.subjects.find_by_name(name).await
    }

    async fn list_reports(&self, filter: &ReportFilter) -> AppResult<Vec<ReportView>> {
        let rows = self.reports.list(filter).await?;
        self.hydrate(rows).await
    }

    async fn create_report(&self, new: NewReport) -> AppResult<report::Model> {
        let model = report::ActiveModel {
            id: Set(self.id_gen.generate()),
            subject_id: Set(new.subject_id),
            reporter_id: Set(new.reporter_id),
            kind: Set(new.kind),
            category: Set(new.category),
            title: Set(new.title),
            description: Set(new.description),
            original_description: Set(new.original_description),
            status: Set(ModerationStatus::Pending),
            is_anonymous: Set(new.is_anonymous),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.reports.create(model).await
    }

    async fn update_report(
        &self,
        id: &str,
        patch: ReportPatch,
    ) -> AppResult<Option<report::Model>> {
        match patch.status {
            Some(status) => self.reports.set_status(id, status).await,
            None => self.reports.find_by_id(id).await,
        }
    }

    async fn find_report(&self, id: &str) -> AppResult<Option<report::Model>> {
        self.reports.find_by_id(id).await
    }

    async fn approve_all_pending(&self) -> AppResult<u64> {
        self.reports.approve_all_pending().await
    }

    async fn create_reply(&self, new: NewReply) -> AppResult<reply::Model> {
        let model = reply::ActiveModel {
            id: Set(self.id_gen.generate()),
            report_id: Set(new.report_id),
            subject_id: Set(new.subject_id),
            content: Set(new.content),
            status: Set(ModerationStatus::Pending),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.replies.create(model).await
    }

    async fn update_reply(&self, id: &str, patch: ReplyPatch) -> AppResult<Option<reply::Model>> {
        let Some(existing) = self.replies.find_by_id(id).await? else {
            return Ok(None);
        };

        let Some(status) = patch.status else {
            return Ok(Some(existing));
        };

        let mut model: reply::ActiveModel = existing.into();
        model.status = Set(status);

        self.replies.update(model).await.map(Some)
    }

    async fn find_reply(&self, id: &str) -> AppResult<Option<reply::Model>> {
        self.replies.find_by_id(id).await
    }

    async fn list_pending_replies(&self) -> AppResult<Vec<reply::Model>> {
        self.replies.list_by_status(ModerationStatus::Pending).await
    }

    async fn create_evidence(&self, new: NewEvidence) -> AppResult<evidence::Model> {
        let model = evidence::ActiveModel {
            id: Set(self.id_gen.generate()),
            report_id: Set(new.report_id),
            file_path: Set(new.file_path),
            file_name: Set(new.file_name),
            file_type: Set(new.file_type),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.evidence.create(model).await
    }

    async fn list_evidence(&self, report_id: &str) -> AppResult<Vec<evidence::Model>> {
        self.evidence.list_by_report(report_id).await
    }

    async fn record_moderation(
        &self,
        new: NewModerationLog,
    ) -> AppResult<moderation_log::Model> {
        let model = moderation_log::ActiveModel {
            id: Set(self.id_gen.generate()),
            report_id: Set(new.report_id),
            moderator_id: Set(new.moderator_id),
            action: Set(new.action),
            notes: Set(new.notes),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.moderation_logs.create(model).await
    }

    async fn find_user(&self, id: &str) -> AppResult<Option<user::Model>> {
        self.users.find_by_id(id).await
    }

    async fn report_stats(&self) -> AppResult<HashMap<String, SubjectStats>> {
        let approved = self
            .reports
            .list(&ReportFilter::with_status(ModerationStatus::Approved))
            .await?;

        let mut stats: HashMap<String, SubjectStats> = HashMap::new();
        for row in approved {
            let entry = stats.entry(row.subject_id).or_default();
            match row.kind {
                ReportKind::Positive => entry.positive += 1,
                ReportKind::Negative => entry.negative += 1,
            }
        }

        Ok(stats)
    }

    async fn admin_stats(&self) -> AppResult<AdminStats> {
        Ok(AdminStats {
            total_reports: self.reports.count_all().await?,
            pending_reports: self
                .reports
                .count_by_status(ModerationStatus::Pending)
                .await?,
            total_subjects: self.subjects.count_all().await?,
            total_users: self.users.count_all().await?,
        })
    }
}
