//! In-memory report store.
//!
//! Process-lifetime fallback used when the database is unconfigured or
//! unreachable. The seeded variant carries a fixed demo data set so the
//! application stays browsable in degraded mode.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use rapport_common::{AppResult, IdGenerator};
use tokio::sync::RwLock;

use crate::entities::{
    evidence, moderation_log, reply,
    report::{self, ModerationStatus, ReportKind},
    subject::{self, SubjectKind},
    user,
};

use super::{
    AdminStats, NewEvidence, NewModerationLog, NewReply, NewReport, NewSubject, ReplyPatch,
    ReportFilter, ReportPatch, ReportStore, ReportView, SubjectStats,
};

#[derive(Default)]
struct Inner {
    subjects: Vec<subject::Model>,
    reports: Vec<report::Model>,
    replies: Vec<reply::Model>,
    evidence: Vec<evidence::Model>,
    moderation_logs: Vec<moderation_log::Model>,
    users: Vec<user::Model>,
}

/// Report store held entirely in process memory.
pub struct MemoryStore {
    inner: RwLock<Inner>,
    id_gen: IdGenerator,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl MemoryStore {
    /// Create an empty store. Tests start here for full determinism.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a store seeded with the fixed demo data set.
    #[must_use]
    pub fn seeded() -> Self {
        let mut inner = Inner::default();
        seed(&mut inner);

        Self {
            inner: RwLock::new(inner),
            id_gen: IdGenerator::new(),
        }
    }

    fn matches(filter: &ReportFilter, row: &report::Model) -> bool {
        if let Some(ref subject_id) = filter.subject_id {
            if &row.subject_id != subject_id {
                return false;
            }
        }
        if let Some(ref status) = filter.status {
            if &row.status != status {
                return false;
            }
        }
        if let Some(ref reporter_id) = filter.reporter_id {
            if &row.reporter_id != reporter_id {
                return false;
            }
        }
        if let Some(ref kind) = filter.kind {
            if &row.kind != kind {
                return false;
            }
        }
        true
    }
}

#[async_trait::async_trait]
impl ReportStore for MemoryStore {
    async fn list_subjects(&self) -> AppResult<Vec<subject::Model>> {
        let inner = self.inner.read().await;
        let mut subjects = inner.subjects.clone();
        subjects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(subjects)
    }

    async fn find_subject(&self, id: &str) -> AppResult<Option<subject::Model>> {
        let inner = self.inner.read().await;
        Ok(inner.subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn create_subject(&self, new: NewSubject) -> AppResult<subject::Model> {
        let model = subject::Model {
            id: self.id_gen.generate(),
            name: new.name,
            kind: new.kind,
            description: new.description,
            location: new.location,
            verified: false,
            created_at: Utc::now().into(),
        };

        self.inner.write().await.subjects.push(model.clone());
        Ok(model)
    }

    async fn find_subject_by_name(&self, name: &str) -> AppResult<Option<subject::Model>> {
        let inner = self.inner.read().await;
        Ok(inner.subjects.iter().find(|s| s.name == name).cloned())
    }

    async fn list_reports(&self, filter: &ReportFilter) -> AppResult<Vec<ReportView>> {
        let inner = self.inner.read().await;

        let mut rows: Vec<&report::Model> = inner
            .reports
            .iter()
            .filter(|r| Self::matches(filter, r))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let views = rows
            .into_iter()
            .map(|row| {
                let subject = inner
                    .subjects
                    .iter()
                    .find(|s| s.id == row.subject_id)
                    .cloned();
                let evidence: Vec<_> = inner
                    .evidence
                    .iter()
                    .filter(|e| e.report_id == row.id)
                    .cloned()
                    .collect();
                let mut replies: Vec<_> = inner
                    .replies
                    .iter()
                    .filter(|r| r.report_id == row.id)
                    .cloned()
                    .collect();
                replies.sort_by(|a, b| b.created_at.cmp(&a.created_at));

                ReportView {
                    report: row.clone(),
                    subject,
                    evidence,
                    replies,
                }
            })
            .collect();

        Ok(views)
    }

    async fn create_report(&self, new: NewReport) -> AppResult<report::Model> {
        let model = report::Model {
            id: self.id_gen.generate(),
            subject_id: new.subject_id,
            reporter_id: new.reporter_id,
            kind: new.kind,
            category: new.category,
            title: new.title,
            description: new.description,
            original_description: new.original_description,
            status: ModerationStatus::Pending,
            is_anonymous: new.is_anonymous,
            created_at: Utc::now().into(),
        };

        self.inner.write().await.reports.push(model.clone());
        Ok(model)
    }

    async fn update_report(
        &self,
        id: &str,
        patch: ReportPatch,
    ) -> AppResult<Option<report::Model>> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.reports.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(status) = patch.status {
            row.status = status;
        }

        Ok(Some(row.clone()))
    }

    async fn find_report(&self, id: &str) -> AppResult<Option<report::Model>> {
        let inner = self.inner.read().await;
        Ok(inner.reports.iter().find(|r| r.id == id).cloned())
    }

    async fn approve_all_pending(&self) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        let mut affected = 0;

        for row in &mut inner.reports {
            if row.status == ModerationStatus::Pending {
                row.status = ModerationStatus::Approved;
                affected += 1;
            }
        }

        Ok(affected)
    }

    async fn create_reply(&self, new: NewReply) -> AppResult<reply::Model> {
        let model = reply::Model {
            id: self.id_gen.generate(),
            report_id: new.report_id,
            subject_id: new.subject_id,
            content: new.content,
            status: ModerationStatus::Pending,
            created_at: Utc::now().into(),
        };

        self.inner.write().await.replies.push(model.clone());
        Ok(model)
    }

    async fn update_reply(&self, id: &str, patch: ReplyPatch) -> AppResult<Option<reply::Model>> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.replies.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(status) = patch.status {
            row.status = status;
        }

        Ok(Some(row.clone()))
    }

    async fn find_reply(&self, id: &str) -> AppResult<Option<reply::Model>> {
        let inner = self.inner.read().await;
        Ok(inner.replies.iter().find(|r| r.id == id).cloned())
    }

    async fn list_pending_replies(&self) -> AppResult<Vec<reply::Model>> {
        let inner = self.inner.read().await;
        let mut rows: Vec<_> = inner
            .replies
            .iter()
            .filter(|r| r.status == ModerationStatus::Pending)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_evidence(&self, new: NewEvidence) -> AppResult<evidence::Model> {
        let model = evidence::Model {
            id: self.id_gen.generate(),
            report_id: new.report_id,
            file_path: new.file_path,
            file_name: new.file_name,
            file_type: new.file_type,
            created_at: Utc::now().into(),
        };

        self.inner.write().await.evidence.push(model.clone());
        Ok(model)
    }

    async fn list_evidence(&self, report_id: &str) -> AppResult<Vec<evidence::Model>> {
        let inner = self.inner.read().await;
        Ok(inner
            .evidence
            .iter()
            .filter(|e| e.report_id == report_id)
            .cloned()
            .collect())
    }

    async fn record_moderation(
        &self,
        new: NewModerationLog,
    ) -> AppResult<moderation_log::Model> {
        let model = moderation_log::Model {
            id: self.id_gen.generate(),
            report_id: new.report_id,
            moderator_id: new.moderator_id,
            action: new.action,
            notes: new.notes,
            created_at: Utc::now().into(),
        };

        self.inner.write().await.moderation_logs.push(model.clone());
        Ok(model)
    }

    async fn find_user(&self, id: &str) -> AppResult<Option<user::Model>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn report_stats(&self) -> AppResult<HashMap<String, SubjectStats>> {
        let inner = self.inner.read().await;

        let mut stats: HashMap<String, SubjectStats> = HashMap::new();
        for row in inner
            .reports
            .iter()
            .filter(|r| r.status == ModerationStatus::Approved)
        {
            let entry = stats.entry(row.subject_id.clone()).or_default();
            match row.kind {
                ReportKind::Positive => entry.positive += 1,
                ReportKind::Negative => entry.negative += 1,
            }
        }

        Ok(stats)
    }

    async fn admin_stats(&self) -> AppResult<AdminStats> {
        let inner = self.inner.read().await;

        Ok(AdminStats {
            total_reports: inner.reports.len() as u64,
            pending_reports: inner
                .reports
                .iter()
                .filter(|r| r.status == ModerationStatus::Pending)
                .count() as u64,
            total_subjects: inner.subjects.len() as u64,
            total_users: inner.users.len() as u64,
        })
    }
}

#[allow(clippy::too_many_lines)]
fn seed(inner: &mut Inner) {
    let at = |y: i32, m: u32, d: u32, h: u32| {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .unwrap_or_default()
            .into()
    };

    inner.subjects = vec![
        subject::Model {
            id: "subject-1".to_string(),
            name: "Accra Mall".to_string(),
            kind: SubjectKind::Company,
            description: Some(
                "Premier shopping destination in Accra with various retail stores and restaurants."
                    .to_string(),
            ),
            location: Some("Accra, Greater Accra".to_string()),
            verified: true,
            created_at: at(2024, 1, 15, 10),
        },
        subject::Model {
            id: "subject-2".to_string(),
            name: "MTN Ghana".to_string(),
            kind: SubjectKind::Company,
            description: Some(
                "Leading telecommunications company providing mobile and internet services."
                    .to_string(),
            ),
            location: Some("Nationwide".to_string()),
            verified: true,
            created_at: at(2024, 1, 10, 8),
        },
        subject::Model {
            id: "subject-3".to_string(),
            name: "Kwame Asante".to_string(),
            kind: SubjectKind::Individual,
            description: Some(
                "Professional electrician providing residential and commercial electrical services."
                    .to_string(),
            ),
            location: Some("Kumasi, Ashanti".to_string()),
            verified: false,
            created_at: at(2024, 2, 1, 14),
        },
        subject::Model {
            id: "subject-4".to_string(),
            name: "Shoprite Ghana".to_string(),
            kind: SubjectKind::Company,
            description: Some(
                "South African retail chain with multiple locations across Ghana.".to_string(),
            ),
            location: Some("Multiple locations".to_string()),
            verified: true,
            created_at: at(2024, 1, 20, 9),
        },
        subject::Model {
            id: "subject-5".to_string(),
            name: "Ama Serwaa".to_string(),
            kind: SubjectKind::Individual,
            description: Some(
                "Experienced seamstress specializing in traditional and modern clothing."
                    .to_string(),
            ),
            location: Some("Tamale, Northern".to_string()),
            verified: false,
            created_at: at(2024, 2, 10, 16),
        },
    ];

    let demo_report = |id: &str,
                       subject_id: &str,
                       reporter_id: &str,
                       kind: ReportKind,
                       category: &str,
                       title: &str,
                       text: &str,
                       status: ModerationStatus,
                       is_anonymous: bool,
                       created_at| report::Model {
        id: id.to_string(),
        subject_id: subject_id.to_string(),
        reporter_id: reporter_id.to_string(),
        kind,
        category: category.to_string(),
        title: title.to_string(),
        description: text.to_string(),
        original_description: text.to_string(),
        status,
        is_anonymous,
        created_at,
    };

    inner.reports = vec![
        demo_report(
            "report-1",
            "subject-1",
            "user-demo",
            ReportKind::Positive,
            "Excellent Service",
            "Great shopping experience at Accra Mall",
            "Had an amazing time shopping at Accra Mall. The staff were very helpful and the \
             facilities were clean and well-maintained.",
            ModerationStatus::Approved,
            false,
            at(2024, 3, 1, 10),
        ),
        demo_report(
            "report-2",
            "subject-2",
            "user-john",
            ReportKind::Negative,
            "Poor Service",
            "Network issues with MTN",
            "Been experiencing frequent network outages in my area. Customer service was not \
             very helpful when I called to complain.",
            ModerationStatus::Approved,
            false,
            at(2024, 3, 5, 14),
        ),
        demo_report(
            "report-3",
            "subject-3",
            "user-demo",
            ReportKind::Positive,
            "Professional Conduct",
            "Excellent electrical work by Kwame",
            "Kwame did an outstanding job rewiring my house. He was punctual, professional, and \
             his work quality was excellent.",
            ModerationStatus::Approved,
            false,
            at(2024, 3, 10, 9),
        ),
        demo_report(
            "report-4",
            "subject-1",
            "user-john",
            ReportKind::Negative,
            "Poor Service",
            "Long waiting times at Accra Mall",
            "Had to wait over 30 minutes just to get assistance at one of the stores. The \
             customer service could be much better.",
            ModerationStatus::Pending,
            false,
            at(2024, 3, 15, 11),
        ),
        demo_report(
            "report-5",
            "subject-2",
            "user-demo",
            ReportKind::Positive,
            "Excellent Service",
            "Great MTN customer support",
            "Called MTN customer service and they resolved my billing issue quickly and \
             professionally.",
            ModerationStatus::Pending,
            true,
            at(2024, 3, 16, 14),
        ),
    ];

    inner.users = vec![
        user::Model {
            id: "user-admin".to_string(),
            email: "admin@rapport.example".to_string(),
            password_hash: String::new(),
            token: None,
            is_admin: true,
            created_at: at(2024, 1, 1, 0),
        },
        user::Model {
            id: "user-demo".to_string(),
            email: "demo@rapport.example".to_string(),
            password_hash: String::new(),
            token: None,
            is_admin: false,
            created_at: at(2024, 1, 2, 0),
        },
        user::Model {
            id: "user-john".to_string(),
            email: "john@rapport.example".to_string(),
            password_hash: String::new(),
            token: None,
            is_admin: false,
            created_at: at(2024, 1, 3, 0),
        },
    ];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_report(subject_id: &str, kind: ReportKind) -> NewReport {
        NewReport {
            subject_id: subject_id.to_string(),
            reporter_id: "user-demo".to_string(),
            kind,
            category: "Other".to_string(),
            title: "A test report".to_string(),
            description: "redacted text".to_string(),
            original_description: "original text".to_string(),
            is_anonymous: false,
        }
    }

    #[tokio::test]
    async fn test_create_report_is_pending() {
        let store = MemoryStore::empty();
        let report = store
            .create_report(new_report("subject-1", ReportKind::Positive))
            .await
            .unwrap();

        assert_eq!(report.status, ModerationStatus::Pending);
    }

    #[tokio::test]
    async fn test_list_reports_filters_by_status() {
        let store = MemoryStore::seeded();

        let approved = store
            .list_reports(&ReportFilter::with_status(ModerationStatus::Approved))
            .await
            .unwrap();

        assert!(!approved.is_empty());
        assert!(
            approved
                .iter()
                .all(|v| v.report.status == ModerationStatus::Approved)
        );
    }

    #[tokio::test]
    async fn test_list_reports_hydrates_subject() {
        let store = MemoryStore::seeded();

        let views = store.list_reports(&ReportFilter::default()).await.unwrap();
        let first = &views[0];

        assert!(first.subject.is_some());
    }

    #[tokio::test]
    async fn test_approve_all_pending() {
        let store = MemoryStore::seeded();

        // Seeded set: 3 approved, 2 pending
        let affected = store.approve_all_pending().await.unwrap();
        assert_eq!(affected, 2);

        let stats = store.admin_stats().await.unwrap();
        assert_eq!(stats.pending_reports, 0);
        assert_eq!(stats.total_reports, 5);
    }

    #[tokio::test]
    async fn test_approve_all_with_mixed_statuses() {
        let store = MemoryStore::empty();

        // 5 reports, 2 of them already approved
        let mut ids = Vec::new();
        for i in 0..5 {
            let report = store
                .create_report(new_report(&format!("subject-{i}"), ReportKind::Positive))
                .await
                .unwrap();
            ids.push(report.id);
        }
        for id in &ids[..2] {
            store
                .update_report(
                    id,
                    ReportPatch {
                        status: Some(ModerationStatus::Approved),
                    },
                )
                .await
                .unwrap();
        }

        let affected = store.approve_all_pending().await.unwrap();
        assert_eq!(affected, 3);

        let stats = store.admin_stats().await.unwrap();
        assert_eq!(stats.pending_reports, 0);

        let approved = store
            .list_reports(&ReportFilter::with_status(ModerationStatus::Approved))
            .await
            .unwrap();
        assert_eq!(approved.len(), 5);
    }

    #[tokio::test]
    async fn test_report_stats_counts_approved_only() {
        let store = MemoryStore::seeded();

        let stats = store.report_stats().await.unwrap();

        // subject-1 has one approved positive and one pending negative
        let s1 = stats.get("subject-1").copied().unwrap_or_default();
        assert_eq!(s1.positive, 1);
        assert_eq!(s1.negative, 0);
    }

    #[tokio::test]
    async fn test_update_report_absent_is_none() {
        let store = MemoryStore::empty();

        let updated = store
            .update_report(
                "missing",
                ReportPatch {
                    status: Some(ModerationStatus::Approved),
                },
            )
            .await
            .unwrap();

        assert!(updated.is_none());
    }
}
