//! End-to-end submission and moderation workflow over a deterministic
//! in-memory store.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rapport_core::services::{
    Decision, ModerationService, ReportService, StatsService, SubmitReportInput,
};
use rapport_db::entities::report::{ModerationStatus, ReportKind};
use rapport_db::entities::subject::SubjectKind;
use rapport_db::store::{MemoryStore, ReportFilter, ReportStore};

fn services(store: &Arc<MemoryStore>) -> (ReportService, ModerationService, StatsService) {
    let store: Arc<dyn ReportStore> = Arc::clone(store) as Arc<dyn ReportStore>;
    (
        ReportService::new(Arc::clone(&store)),
        ModerationService::new(Arc::clone(&store)),
        StatsService::new(store),
    )
}

fn submission(description: &str) -> SubmitReportInput {
    SubmitReportInput {
        subject_id: Some("subject-1".to_string()),
        subject_name: None,
        subject_kind: None,
        subject_location: None,
        kind: ReportKind::Negative,
        category: "Overcharging".to_string(),
        title: "Billed twice for one purchase".to_string(),
        description: description.to_string(),
        is_anonymous: false,
    }
}

#[tokio::test]
async fn submitted_report_is_redacted_and_pending() {
    let store = Arc::new(MemoryStore::seeded());
    let (reports, _, _) = services(&store);

    // 60+ characters with a Ghanaian-style phone number embedded
    let description =
        "They overcharged me twice and refused a refund. Call 0244123456 to confirm this.";
    let report = reports.submit("user-demo", submission(description)).await.unwrap();

    assert_eq!(report.status, ModerationStatus::Pending);
    assert!(report.description.contains("[PHONE_REDACTED]"));
    assert!(!report.description.contains("0244123456"));
    assert!(report.original_description.contains("0244123456"));
}

#[tokio::test]
async fn approval_feeds_public_statistics_exactly_once() {
    let store = Arc::new(MemoryStore::seeded());
    let (reports, moderation, stats) = services(&store);

    let before = stats.subject_stats("subject-1").await.unwrap();

    let description =
        "The checkout queue took over an hour and staff were dismissive of complaints.";
    let report = reports.submit("user-demo", submission(description)).await.unwrap();

    // Pending reports are invisible to public statistics
    let pending_stats = stats.subject_stats("subject-1").await.unwrap();
    assert_eq!(pending_stats, before);

    moderation
        .moderate_report("user-admin", &report.id, Decision::Approve, None)
        .await
        .unwrap();

    let after = stats.subject_stats("subject-1").await.unwrap();
    assert_eq!(after.negative, before.negative + 1);
    assert_eq!(after.positive, before.positive);

    // A second approve attempt conflicts and cannot double-count
    let second = moderation
        .moderate_report("user-admin", &report.id, Decision::Approve, None)
        .await;
    assert!(second.is_err());

    let unchanged = stats.subject_stats("subject-1").await.unwrap();
    assert_eq!(unchanged, after);
}

#[tokio::test]
async fn approved_listing_never_leaks_other_statuses() {
    let store = Arc::new(MemoryStore::seeded());
    let (reports, moderation, _) = services(&store);

    moderation
        .moderate_report("user-admin", "report-4", Decision::Reject, None)
        .await
        .unwrap();

    let approved = reports
        .list(&ReportFilter::with_status(ModerationStatus::Approved))
        .await
        .unwrap();

    assert!(!approved.is_empty());
    for view in &approved {
        assert_eq!(view.report.status, ModerationStatus::Approved);
    }
}

#[tokio::test]
async fn approve_all_clears_the_queue() {
    let store = Arc::new(MemoryStore::seeded());
    let (reports, moderation, stats) = services(&store);

    // Seeded store carries 3 approved and 2 pending; add one more pending.
    let description =
        "Deliveries keep arriving late and nobody answers the support line anymore.";
    reports.submit("user-john", submission(description)).await.unwrap();

    let affected = moderation.approve_all_pending("user-admin").await.unwrap();
    assert_eq!(affected, 3);

    let admin = stats.admin_stats().await.unwrap();
    assert_eq!(admin.pending_reports, 0);
    assert_eq!(admin.total_reports, 6);

    let approved = reports
        .list(&ReportFilter::with_status(ModerationStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.len(), 6);
}

#[tokio::test]
async fn rejected_report_can_be_restored_and_redecided() {
    let store = Arc::new(MemoryStore::seeded());
    let (_, moderation, stats) = services(&store);

    moderation
        .moderate_report("user-admin", "report-5", Decision::Reject, None)
        .await
        .unwrap();

    let restored = moderation
        .restore_report("user-admin", "report-5")
        .await
        .unwrap();
    assert_eq!(restored.status, ModerationStatus::Pending);

    // After restore the report can be decided again
    let approved = moderation
        .moderate_report("user-admin", "report-5", Decision::Approve, None)
        .await
        .unwrap();
    assert_eq!(approved.status, ModerationStatus::Approved);

    // report-5 is a positive report about subject-2
    let subject_stats = stats.subject_stats("subject-2").await.unwrap();
    assert_eq!(subject_stats.positive, 1);
}

#[tokio::test]
async fn new_subject_created_during_submission() {
    let store = Arc::new(MemoryStore::empty());
    let (reports, _, _) = services(&store);

    let input = SubmitReportInput {
        subject_id: None,
        subject_name: Some("Golden Tailors".to_string()),
        subject_kind: Some(SubjectKind::Company),
        subject_location: Some("Takoradi, Western".to_string()),
        kind: ReportKind::Positive,
        category: "Timely Delivery".to_string(),
        title: "Finished my order early".to_string(),
        description: "My order was ready two days before the agreed date and fit perfectly."
            .to_string(),
        is_anonymous: false,
    };

    let report = reports.submit("user-1", input).await.unwrap();

    let subject = store.find_subject(&report.subject_id).await.unwrap().unwrap();
    assert_eq!(subject.name, "Golden Tailors");
    assert!(!subject.verified);
}
