//! Public statistics endpoints.

use std::collections::HashMap;

use axum::{Json, Router, extract::State, routing::post};
use rapport_common::AppResult;
use rapport_db::store::SubjectStats;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

/// Per-subject counters response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStatsResponse {
    pub positive: u64,
    pub negative: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<f64>,
}

/// Subject stats request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStatsRequest {
    pub subject_id: String,
}

/// All per-subject counters, keyed by subject ID.
async fn report_stats(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<HashMap<String, SubjectStats>>> {
    let stats = state.stats_service.report_stats().await?;

    Ok(ApiResponse::ok(stats))
}

/// Counters and trust score for one subject.
async fn subject_stats(
    State(state): State<AppState>,
    Json(req): Json<SubjectStatsRequest>,
) -> AppResult<ApiResponse<SubjectStatsResponse>> {
    let stats = state.stats_service.subject_stats(&req.subject_id).await?;
    let trust_score = state.stats_service.trust_score(&req.subject_id).await?;

    Ok(ApiResponse::ok(SubjectStatsResponse {
        positive: stats.positive,
        negative: stats.negative,
        trust_score,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports", post(report_stats))
        .route("/subject", post(subject_stats))
}
