//! The report store: CRUD plus filtered retrieval for subjects, reports,
//! evidence, and replies.
//!
//! The contract is a trait so callers can compose the Postgres-backed store,
//! the seeded in-memory store, or the [`ResilientStore`] wrapper that falls
//! back from one to the other on infrastructure failures.

mod memory;
mod pg;
mod resilient;

pub use memory::MemoryStore;
pub use pg::PgStore;
pub use resilient::ResilientStore;

use std::collections::HashMap;

use rapport_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::entities::{
    evidence, moderation_log,
    moderation_log::ModerationAction,
    reply,
    report::{self, ModerationStatus, ReportKind},
    subject::{self, SubjectKind},
    user,
};

/// Filter for report listings. Each field, if present, narrows results by
/// exact match; an empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Restrict to one subject.
    pub subject_id: Option<String>,
    /// Restrict to one moderation status.
    pub status: Option<ModerationStatus>,
    /// Restrict to one reporter.
    pub reporter_id: Option<String>,
    /// Restrict to positive or negative reports.
    pub kind: Option<ReportKind>,
}

impl ReportFilter {
    /// Filter for reports with the given status.
    #[must_use]
    pub fn with_status(status: ModerationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Fields for creating a subject. ID, timestamp, and the `verified` flag are
/// store-assigned.
#[derive(Debug, Clone)]
pub struct NewSubject {
    /// Display name.
    pub name: String,
    /// Company or individual.
    pub kind: SubjectKind,
    /// Free-form description.
    pub description: Option<String>,
    /// Location.
    pub location: Option<String>,
}

/// Fields for creating a report. ID, timestamp, and status are
/// store-assigned; status always starts at pending.
#[derive(Debug, Clone)]
pub struct NewReport {
    /// The subject the report is about.
    pub subject_id: String,
    /// The acting user. Assigned by the service layer from the session,
    /// never taken from client input.
    pub reporter_id: String,
    /// Positive or negative.
    pub kind: ReportKind,
    /// Category label.
    pub category: String,
    /// Short headline.
    pub title: String,
    /// Redacted text for public display.
    pub description: String,
    /// Raw text retained for moderator review.
    pub original_description: String,
    /// Hide reporter identity from public view.
    pub is_anonymous: bool,
}

/// Partial update for a report. Only moderation may change status.
#[derive(Debug, Clone, Default)]
pub struct ReportPatch {
    /// New moderation status.
    pub status: Option<ModerationStatus>,
}

/// Fields for creating a reply. ID, timestamp, and status are
/// store-assigned; status always starts at pending.
#[derive(Debug, Clone)]
pub struct NewReply {
    /// The report being replied to.
    pub report_id: String,
    /// The subject issuing the reply.
    pub subject_id: String,
    /// Reply text.
    pub content: String,
}

/// Partial update for a reply.
#[derive(Debug, Clone, Default)]
pub struct ReplyPatch {
    /// New moderation status.
    pub status: Option<ModerationStatus>,
}

/// Fields for creating an evidence record once the file is persisted.
#[derive(Debug, Clone)]
pub struct NewEvidence {
    /// Parent report.
    pub report_id: String,
    /// Storage locator returned by the storage backend.
    pub file_path: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub file_type: String,
}

/// Fields for recording a moderation decision.
#[derive(Debug, Clone)]
pub struct NewModerationLog {
    /// The report the decision applies to.
    pub report_id: String,
    /// The moderator who acted.
    pub moderator_id: String,
    /// What the moderator did.
    pub action: ModerationAction,
    /// Optional free-form notes.
    pub notes: Option<String>,
}

/// A report hydrated with its subject, evidence, and replies for display.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    /// The report row.
    pub report: report::Model,
    /// The subject the report is about, if it still resolves.
    pub subject: Option<subject::Model>,
    /// Attached evidence, in upload order.
    pub evidence: Vec<evidence::Model>,
    /// Replies, newest first.
    pub replies: Vec<reply::Model>,
}

/// Approved-report counters for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStats {
    /// Approved positive reports.
    pub positive: u64,
    /// Approved negative reports.
    pub negative: u64,
}

/// Point-in-time counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    /// All reports, any status.
    pub total_reports: u64,
    /// Reports awaiting moderation.
    pub pending_reports: u64,
    /// All subjects.
    pub total_subjects: u64,
    /// All registered users.
    pub total_users: u64,
}

/// Durable CRUD plus filtered retrieval for the four report-domain entities.
///
/// Status transitions flow through [`update_report`](ReportStore::update_report)
/// and [`update_reply`](ReportStore::update_reply) only; creation always
/// yields pending rows.
#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    // ========== Subjects ==========

    /// All subjects, newest first.
    async fn list_subjects(&self) -> AppResult<Vec<subject::Model>>;

    /// Look up one subject; absent IDs yield `None`, not an error.
    async fn find_subject(&self, id: &str) -> AppResult<Option<subject::Model>>;

    /// Create a subject. `verified` starts false.
    async fn create_subject(&self, new: NewSubject) -> AppResult<subject::Model>;

    /// Look up a subject by exact name (submission-time dedup).
    async fn find_subject_by_name(&self, name: &str) -> AppResult<Option<subject::Model>>;

    // ========== Reports ==========

    /// Reports matching the filter, newest first, hydrated for display.
    async fn list_reports(&self, filter: &ReportFilter) -> AppResult<Vec<ReportView>>;

    /// Create a report with status pending.
    async fn create_report(&self, new: NewReport) -> AppResult<report::Model>;

    /// Apply a partial update; absent IDs yield `None`.
    async fn update_report(
        &self,
        id: &str,
        patch: ReportPatch,
    ) -> AppResult<Option<report::Model>>;

    /// Look up one report row without hydration.
    async fn find_report(&self, id: &str) -> AppResult<Option<report::Model>>;

    /// Transition every pending report to approved; returns how many rows
    /// changed. Best-effort with respect to concurrent submissions.
    async fn approve_all_pending(&self) -> AppResult<u64>;

    // ========== Replies ==========

    /// Create a reply with status pending.
    async fn create_reply(&self, new: NewReply) -> AppResult<reply::Model>;

    /// Apply a partial update; absent IDs yield `None`.
    async fn update_reply(&self, id: &str, patch: ReplyPatch) -> AppResult<Option<reply::Model>>;

    /// Look up one reply.
    async fn find_reply(&self, id: &str) -> AppResult<Option<reply::Model>>;

    /// Replies awaiting moderation, newest first.
    async fn list_pending_replies(&self) -> AppResult<Vec<reply::Model>>;

    // ========== Evidence ==========

    /// Create an evidence record for an already-persisted file.
    async fn create_evidence(&self, new: NewEvidence) -> AppResult<evidence::Model>;

    /// Evidence for a report, in upload order.
    async fn list_evidence(&self, report_id: &str) -> AppResult<Vec<evidence::Model>>;

    // ========== Moderation audit ==========

    /// Record a moderation decision.
    async fn record_moderation(
        &self,
        new: NewModerationLog,
    ) -> AppResult<moderation_log::Model>;

    // ========== Users ==========

    /// Look up a user by ID.
    async fn find_user(&self, id: &str) -> AppResult<Option<user::Model>>;

    // ========== Statistics ==========

    /// Per-subject positive/negative counters over approved reports only.
    async fn report_stats(&self) -> AppResult<HashMap<String, SubjectStats>>;

    /// Point-in-time counts for the admin dashboard.
    async fn admin_stats(&self) -> AppResult<AdminStats>;
}
