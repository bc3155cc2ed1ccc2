//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use rapport_core::{
    AccountService, EvidenceService, ModerationService, ReplyService, ReportService, StatsService,
    SubjectService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub subject_service: SubjectService,
    pub report_service: ReportService,
    pub reply_service: ReplyService,
    pub evidence_service: EvidenceService,
    pub moderation_service: ModerationService,
    pub stats_service: StatsService,
    pub account_service: AccountService,
}

/// Authentication middleware.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Try to extract token from header
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        // Authenticate user by token
        if let Ok(user) = state.account_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
