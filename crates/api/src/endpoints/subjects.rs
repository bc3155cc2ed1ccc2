//! Subject endpoints.

use axum::{Json, Router, extract::State, routing::post};
use rapport_common::AppResult;
use rapport_core::services::subject::CreateSubjectInput;
use rapport_db::entities::subject::{self, SubjectKind};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Subject response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    pub id: String,
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub verified: bool,
    pub created_at: String,
}

impl From<subject::Model> for SubjectResponse {
    fn from(s: subject::Model) -> Self {
        Self {
            id: s.id,
            name: s.name,
            kind: match s.kind {
                SubjectKind::Company => "company".to_string(),
                SubjectKind::Individual => "individual".to_string(),
            },
            description: s.description,
            location: s.location,
            verified: s.verified,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Show subject request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowSubjectRequest {
    pub subject_id: String,
}

// ==================== Handlers ====================

/// List all subjects, newest first.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<SubjectResponse>>> {
    let subjects = state.subject_service.list().await?;

    Ok(ApiResponse::ok(
        subjects.into_iter().map(Into::into).collect(),
    ))
}

/// Show a single subject.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowSubjectRequest>,
) -> AppResult<ApiResponse<SubjectResponse>> {
    let subject = state.subject_service.get(&req.subject_id).await?;

    Ok(ApiResponse::ok(subject.into()))
}

/// Create a subject.
async fn create(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSubjectInput>,
) -> AppResult<ApiResponse<SubjectResponse>> {
    let subject = state.subject_service.create(input).await?;

    Ok(ApiResponse::ok(subject.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/show", post(show))
        .route("/create", post(create))
}
