//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::post};
use rapport_common::AppResult;
use rapport_core::services::account::{LoginInput, RegisterInput, Session};
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Session response: the account plus its bearer token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
    pub is_admin: bool,
    pub token: String,
}

impl From<Session> for SessionResponse {
    fn from(s: Session) -> Self {
        Self {
            user_id: s.user.id,
            email: s.user.email,
            is_admin: s.user.is_admin,
            token: s.token,
        }
    }
}

/// Current user response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: String,
}

// ==================== Handlers ====================

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let session = state.account_service.register(input).await?;

    Ok(ApiResponse::ok(session.into()))
}

/// Log in with email and password.
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let session = state.account_service.login(input).await?;

    Ok(ApiResponse::ok(session.into()))
}

/// The authenticated user behind the bearer token.
async fn me(AuthUser(user): AuthUser) -> AppResult<ApiResponse<MeResponse>> {
    Ok(ApiResponse::ok(MeResponse {
        user_id: user.id,
        email: user.email,
        is_admin: user.is_admin,
        created_at: user.created_at.to_rfc3339(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", post(me))
}
