//! Report endpoints.

use axum::{Json, Router, extract::State, routing::post};
use rapport_common::AppResult;
use rapport_core::services::report::SubmitReportInput;
use rapport_db::entities::report::{ModerationStatus, ReportKind};
use rapport_db::store::{ReportFilter, ReportView};
use serde::{Deserialize, Serialize};

use super::{replies::ReplyResponse, subjects::SubjectResponse};
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Evidence attachment in a report response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceResponse {
    pub id: String,
    pub file_path: String,
    pub file_name: String,
    pub file_type: String,
    pub created_at: String,
}

impl From<rapport_db::entities::evidence::Model> for EvidenceResponse {
    fn from(e: rapport_db::entities::evidence::Model) -> Self {
        Self {
            id: e.id,
            file_path: e.file_path,
            file_name: e.file_name,
            file_type: e.file_type,
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

/// Public report response. The reporter is hidden for anonymous reports and
/// only the redacted description is ever exposed here.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub subject_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<String>,
    pub kind: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub is_anonymous: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<SubjectResponse>,
    pub evidence: Vec<EvidenceResponse>,
    pub replies: Vec<ReplyResponse>,
}

pub(super) fn status_str(status: &ModerationStatus) -> String {
    match status {
        ModerationStatus::Pending => "pending".to_string(),
        ModerationStatus::Approved => "approved".to_string(),
        ModerationStatus::Rejected => "rejected".to_string(),
    }
}

pub(super) fn kind_str(kind: &ReportKind) -> String {
    match kind {
        ReportKind::Positive => "positive".to_string(),
        ReportKind::Negative => "negative".to_string(),
    }
}

impl From<ReportView> for ReportResponse {
    fn from(view: ReportView) -> Self {
        let report = view.report;
        Self {
            id: report.id,
            subject_id: report.subject_id,
            reporter_id: if report.is_anonymous {
                None
            } else {
                Some(report.reporter_id)
            },
            kind: kind_str(&report.kind),
            category: report.category,
            title: report.title,
            description: report.description,
            status: status_str(&report.status),
            is_anonymous: report.is_anonymous,
            created_at: report.created_at.to_rfc3339(),
            subject: view.subject.map(Into::into),
            evidence: view.evidence.into_iter().map(Into::into).collect(),
            // Rejected replies never surface publicly
            replies: view
                .replies
                .into_iter()
                .filter(|r| r.status != ModerationStatus::Rejected)
                .map(Into::into)
                .collect(),
        }
    }
}

/// List reports request; every field is an optional exact-match filter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListReportsRequest {
    pub subject_id: Option<String>,
    pub status: Option<ModerationStatus>,
    pub reporter_id: Option<String>,
    pub kind: Option<ReportKind>,
}

impl From<ListReportsRequest> for ReportFilter {
    fn from(req: ListReportsRequest) -> Self {
        Self {
            subject_id: req.subject_id,
            status: req.status,
            reporter_id: req.reporter_id,
            kind: req.kind,
        }
    }
}

// ==================== Handlers ====================

/// List reports matching the filter, newest first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListReportsRequest>,
) -> AppResult<ApiResponse<Vec<ReportResponse>>> {
    let views = state.report_service.list(&req.into()).await?;

    Ok(ApiResponse::ok(views.into_iter().map(Into::into).collect()))
}

/// Submit a report. Requires an authenticated user; the reporter ID is taken
/// from the session, never from the request body.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitReportInput>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state.report_service.submit(&user.id, input).await?;

    // Fresh submissions have no attachments or replies yet; clients re-fetch
    // the listing for hydrated views.
    Ok(ApiResponse::ok(ReportResponse {
        id: report.id,
        subject_id: report.subject_id,
        reporter_id: if report.is_anonymous {
            None
        } else {
            Some(report.reporter_id)
        },
        kind: kind_str(&report.kind),
        category: report.category,
        title: report.title,
        description: report.description,
        status: status_str(&report.status),
        is_anonymous: report.is_anonymous,
        created_at: report.created_at.to_rfc3339(),
        subject: None,
        evidence: Vec::new(),
        replies: Vec::new(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/create", post(create))
}
