//! Report submission service.

use std::sync::Arc;

use rapport_common::{AppError, AppResult};
use rapport_db::entities::{
    report,
    report::ReportKind,
    subject::SubjectKind,
};
use rapport_db::store::{NewReport, NewSubject, ReportFilter, ReportStore, ReportView};
use serde::Deserialize;
use validator::Validate;

use crate::categories::is_valid_category;
use crate::redaction::redact;

/// Minimum description length enforced before any store call.
pub const MIN_DESCRIPTION_LENGTH: usize = 50;

/// Input for submitting a report.
///
/// Either an existing `subject_id` or a `subject_name` (with optional kind
/// detail) must be supplied; a named subject that does not exist yet is
/// created as part of the submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportInput {
    /// Existing subject.
    pub subject_id: Option<String>,
    /// Subject name to find or create.
    #[validate(length(min = 2, max = 256))]
    pub subject_name: Option<String>,
    /// Kind for a newly created subject. Defaults to company.
    pub subject_kind: Option<SubjectKind>,
    /// Location for a newly created subject.
    pub subject_location: Option<String>,
    /// Positive or negative experience.
    pub kind: ReportKind,
    /// Category label from the fixed per-kind vocabulary.
    pub category: String,
    #[validate(length(min = 5, max = 200))]
    pub title: String,
    #[validate(length(min = 50, message = "Description must be at least 50 characters"))]
    pub description: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// Service for creating and listing reports.
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Submit a report on behalf of the acting user.
    ///
    /// The reporter ID always comes from the authenticated session, the
    /// public description is the redacted transform of the submitted text,
    /// and the stored status is pending no matter what the client sent.
    pub async fn submit(
        &self,
        reporter_id: &str,
        input: SubmitReportInput,
    ) -> AppResult<report::Model> {
        input.validate()?;

        if !is_valid_category(&input.kind, &input.category) {
            return Err(AppError::Validation(format!(
                "Unknown category \"{}\" for this report type",
                input.category
            )));
        }

        let subject_id = self.resolve_subject(&input).await?;
        let description = redact(&input.description);

        self.store
            .create_report(NewReport {
                subject_id,
                reporter_id: reporter_id.to_string(),
                kind: input.kind,
                category: input.category,
                title: input.title,
                description,
                original_description: input.description,
                is_anonymous: input.is_anonymous,
            })
            .await
    }

    /// List reports matching the filter, hydrated for display.
    pub async fn list(&self, filter: &ReportFilter) -> AppResult<Vec<ReportView>> {
        self.store.list_reports(filter).await
    }

    /// Look up one report row.
    pub async fn get(&self, id: &str) -> AppResult<report::Model> {
        self.store
            .find_report(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {id} not found")))
    }

    async fn resolve_subject(&self, input: &SubmitReportInput) -> AppResult<String> {
        if let Some(ref id) = input.subject_id {
            let subject = self
                .store
                .find_subject(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Subject {id} not found")))?;
            return Ok(subject.id);
        }

        let Some(ref name) = input.subject_name else {
            return Err(AppError::Validation(
                "A subject is required: pass subjectId or subjectName".to_string(),
            ));
        };

        if let Some(existing) = self.store.find_subject_by_name(name).await? {
            return Ok(existing.id);
        }

        let created = self
            .store
            .create_subject(NewSubject {
                name: name.clone(),
                kind: input.subject_kind.clone().unwrap_or(SubjectKind::Company),
                description: None,
                location: input.subject_location.clone(),
            })
            .await?;

        Ok(created.id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rapport_db::entities::report::ModerationStatus;
    use rapport_db::store::MemoryStore;

    fn submit_input(subject_name: &str, description: &str) -> SubmitReportInput {
        SubmitReportInput {
            subject_id: None,
            subject_name: Some(subject_name.to_string()),
            subject_kind: Some(SubjectKind::Company),
            subject_location: None,
            kind: ReportKind::Negative,
            category: "Poor Service".to_string(),
            title: "Slow responses everywhere".to_string(),
            description: description.to_string(),
            is_anonymous: false,
        }
    }

    fn service() -> ReportService {
        ReportService::new(Arc::new(MemoryStore::empty()))
    }

    const LONG_TEXT: &str =
        "The staff ignored my complaint for three weeks and never called me back once.";

    #[tokio::test]
    async fn test_submit_creates_pending_report() {
        let service = service();

        let report = service
            .submit("user-1", submit_input("Test Shop", LONG_TEXT))
            .await
            .unwrap();

        assert_eq!(report.status, ModerationStatus::Pending);
        assert_eq!(report.reporter_id, "user-1");
    }

    #[tokio::test]
    async fn test_submit_rejects_short_description() {
        let service = service();

        let result = service
            .submit("user-1", submit_input("Test Shop", "Too short."))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_category_mismatch() {
        let service = service();

        let mut input = submit_input("Test Shop", LONG_TEXT);
        input.category = "Excellent Service".to_string(); // positive label on a negative report

        let result = service.submit("user-1", input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_redacts_description_keeps_original() {
        let service = service();

        let text = format!("{LONG_TEXT} You can verify by calling 0244123456 today.");
        let report = service
            .submit("user-1", submit_input("Test Shop", &text))
            .await
            .unwrap();

        assert!(report.description.contains("[PHONE_REDACTED]"));
        assert!(!report.description.contains("0244123456"));
        assert!(report.original_description.contains("0244123456"));
    }

    #[tokio::test]
    async fn test_submit_missing_subject_reference() {
        let service = service();

        let mut input = submit_input("x", LONG_TEXT);
        input.subject_name = None;

        let result = service.submit("user-1", input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_unknown_subject_id() {
        let service = service();

        let mut input = submit_input("x", LONG_TEXT);
        input.subject_name = None;
        input.subject_id = Some("missing".to_string());

        let result = service.submit("user-1", input).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_submit_reuses_existing_subject_by_name() {
        let service = service();

        let first = service
            .submit("user-1", submit_input("Same Shop", LONG_TEXT))
            .await
            .unwrap();
        let second = service
            .submit("user-2", submit_input("Same Shop", LONG_TEXT))
            .await
            .unwrap();

        assert_eq!(first.subject_id, second.subject_id);
    }
}
