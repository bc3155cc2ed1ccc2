//! Evidence upload endpoints.

use axum::{
    Router,
    extract::{Multipart, State},
    routing::post,
};
use rapport_common::{AppError, AppResult};
use rapport_core::services::evidence::EvidenceUpload;

use super::reports::EvidenceResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Upload evidence files for a report via multipart form.
///
/// Fields: `reportId` (text) plus up to five `file` parts. The whole batch
/// is validated before anything is persisted.
async fn upload(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<Vec<EvidenceResponse>>> {
    let mut report_id: Option<String> = None;
    let mut files: Vec<EvidenceUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "reportId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !text.is_empty() {
                    report_id = Some(text);
                }
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .map(std::string::ToString::to_string)
                    .unwrap_or_else(|| "file".to_string());
                let content_type = field
                    .content_type()
                    .map(std::string::ToString::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();

                files.push(EvidenceUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let report_id =
        report_id.ok_or_else(|| AppError::BadRequest("reportId is required".to_string()))?;

    let records = state.evidence_service.attach(&report_id, files).await?;

    Ok(ApiResponse::ok(
        records.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}
