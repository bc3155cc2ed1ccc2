//! Reply endpoints.

use axum::{Json, Router, extract::State, routing::post};
use rapport_common::AppResult;
use rapport_core::services::reply::CreateReplyInput;
use rapport_db::entities::reply;
use serde::Serialize;

use super::reports::status_str;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Reply response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub id: String,
    pub report_id: String,
    pub subject_id: String,
    pub content: String,
    pub status: String,
    pub created_at: String,
}

impl From<reply::Model> for ReplyResponse {
    fn from(r: reply::Model) -> Self {
        Self {
            id: r.id,
            report_id: r.report_id,
            subject_id: r.subject_id,
            content: r.content,
            status: status_str(&r.status),
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

// ==================== Handlers ====================

/// Create a reply on behalf of a subject. Enters moderation as pending.
async fn create(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReplyInput>,
) -> AppResult<ApiResponse<ReplyResponse>> {
    let reply = state.reply_service.create(input).await?;

    Ok(ApiResponse::ok(reply.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/create", post(create))
}
