//! API endpoints.

mod admin;
mod auth;
mod evidence;
mod replies;
mod reports;
mod stats;
mod subjects;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/subjects", subjects::router())
        .nest("/reports", reports::router())
        .nest("/evidence", evidence::router())
        .nest("/replies", replies::router())
        .nest("/admin", admin::router())
        .nest("/stats", stats::router())
}
