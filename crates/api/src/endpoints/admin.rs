//! Admin endpoints: moderation queues, decisions, and dashboard stats.

use axum::{Json, Router, extract::State, routing::post};
use rapport_common::AppResult;
use rapport_core::services::moderation::Decision;
use rapport_db::store::{AdminStats, ReportView};
use serde::{Deserialize, Serialize};

use super::replies::ReplyResponse;
use super::reports::{kind_str, status_str};
use super::subjects::SubjectResponse;
use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Report view for moderator review. Unlike the public shape it carries the
/// unredacted text and never hides the reporter.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationReportResponse {
    pub id: String,
    pub subject_id: String,
    pub reporter_id: String,
    pub kind: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub original_description: String,
    pub status: String,
    pub is_anonymous: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<SubjectResponse>,
    pub evidence: Vec<super::reports::EvidenceResponse>,
    pub replies: Vec<ReplyResponse>,
}

impl From<ReportView> for ModerationReportResponse {
    fn from(view: ReportView) -> Self {
        let report = view.report;
        Self {
            id: report.id,
            subject_id: report.subject_id,
            reporter_id: report.reporter_id,
            kind: kind_str(&report.kind),
            category: report.category,
            title: report.title,
            description: report.description,
            original_description: report.original_description,
            status: status_str(&report.status),
            is_anonymous: report.is_anonymous,
            created_at: report.created_at.to_rfc3339(),
            subject: view.subject.map(Into::into),
            evidence: view.evidence.into_iter().map(Into::into).collect(),
            replies: view.replies.into_iter().map(Into::into).collect(),
        }
    }
}

/// Moderate report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateReportRequest {
    pub report_id: String,
    pub decision: Decision,
    pub notes: Option<String>,
}

/// Moderate reply request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateReplyRequest {
    pub reply_id: String,
    pub decision: Decision,
}

/// Restore report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreReportRequest {
    pub report_id: String,
}

/// Bulk approve response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveAllResponse {
    pub approved: u64,
}

/// Admin dashboard stats response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    pub total_reports: u64,
    pub pending_reports: u64,
    pub total_subjects: u64,
    pub total_users: u64,
}

impl From<AdminStats> for AdminStatsResponse {
    fn from(s: AdminStats) -> Self {
        Self {
            total_reports: s.total_reports,
            pending_reports: s.pending_reports,
            total_subjects: s.total_subjects,
            total_users: s.total_users,
        }
    }
}

// ==================== Handlers ====================

/// Reports awaiting moderation.
async fn pending_reports(
    AdminUser(_user): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ModerationReportResponse>>> {
    let views = state.moderation_service.pending_reports().await?;

    Ok(ApiResponse::ok(views.into_iter().map(Into::into).collect()))
}

/// Replies awaiting moderation.
async fn pending_replies(
    AdminUser(_user): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ReplyResponse>>> {
    let replies = state.moderation_service.pending_replies().await?;

    Ok(ApiResponse::ok(
        replies.into_iter().map(Into::into).collect(),
    ))
}

/// Approve or reject a pending report.
async fn moderate_report(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<ModerateReportRequest>,
) -> AppResult<ApiResponse<ModerationReportResponse>> {
    let report = state
        .moderation_service
        .moderate_report(&user.id, &req.report_id, req.decision, req.notes)
        .await?;

    Ok(ApiResponse::ok(
        ReportView {
            report,
            subject: None,
            evidence: Vec::new(),
            replies: Vec::new(),
        }
        .into(),
    ))
}

/// Approve or reject a pending reply.
async fn moderate_reply(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<ModerateReplyRequest>,
) -> AppResult<ApiResponse<ReplyResponse>> {
    let reply = state
        .moderation_service
        .moderate_reply(&user.id, &req.reply_id, req.decision)
        .await?;

    Ok(ApiResponse::ok(reply.into()))
}

/// Restore a rejected report to the moderation queue.
async fn restore_report(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<RestoreReportRequest>,
) -> AppResult<ApiResponse<ModerationReportResponse>> {
    let report = state
        .moderation_service
        .restore_report(&user.id, &req.report_id)
        .await?;

    Ok(ApiResponse::ok(
        ReportView {
            report,
            subject: None,
            evidence: Vec::new(),
            replies: Vec::new(),
        }
        .into(),
    ))
}

/// Approve every currently pending report.
async fn approve_all(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ApproveAllResponse>> {
    let approved = state.moderation_service.approve_all_pending(&user.id).await?;

    Ok(ApiResponse::ok(ApproveAllResponse { approved }))
}

/// Dashboard counters.
async fn stats(
    AdminUser(_user): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AdminStatsResponse>> {
    let stats = state.stats_service.admin_stats().await?;

    Ok(ApiResponse::ok(stats.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending-reports", post(pending_reports))
        .route("/pending-replies", post(pending_replies))
        .route("/moderate-report", post(moderate_report))
        .route("/moderate-reply", post(moderate_reply))
        .route("/restore-report", post(restore_report))
        .route("/approve-all", post(approve_all))
        .route("/stats", post(stats))
}
