//! API integration tests.
//!
//! Exercises the router end-to-end over the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware,
};
use http_body_util::BodyExt;
use rapport_api::{middleware::AppState, router as api_router};
use rapport_common::{LocalStorage, StorageBackend};
use rapport_core::{
    AccountService, EvidenceService, ModerationService, ReplyService, ReportService, StatsService,
    SubjectService,
};
use rapport_db::store::{MemoryStore, ReportStore};
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_TOKEN: &str = "admin-test-token";

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rapport-api-test-{}-{name}", std::process::id()))
}

/// Credential file seeding the admin session used by moderation tests. The
/// admin's user row also exists in the seeded store, so the moderator check
/// passes.
fn write_admin_credentials(path: &PathBuf) {
    let contents = json!({
        "admin@rapport.example": {
            "user": {
                "id": "user-admin",
                "email": "admin@rapport.example",
                "password_hash": "",
                "token": ADMIN_TOKEN,
                "is_admin": true,
                "created_at": "2024-01-01T00:00:00Z"
            },
            "password_hash": ""
        }
    });
    std::fs::write(path, serde_json::to_vec_pretty(&contents).unwrap()).unwrap();
}

fn test_app(tag: &str) -> Router {
    let store: Arc<dyn ReportStore> = Arc::new(MemoryStore::seeded());

    let credentials_path = temp_path(&format!("credentials-{tag}.json"));
    write_admin_credentials(&credentials_path);

    let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::new(
        temp_path(&format!("files-{tag}")),
        "/files".to_string(),
    ));

    let state = AppState {
        subject_service: SubjectService::new(Arc::clone(&store)),
        report_service: ReportService::new(Arc::clone(&store)),
        reply_service: ReplyService::new(Arc::clone(&store)),
        evidence_service: EvidenceService::new(Arc::clone(&store), storage),
        moderation_service: ModerationService::new(Arc::clone(&store)),
        stats_service: StatsService::new(Arc::clone(&store)),
        account_service: AccountService::new(None, credentials_path),
    };

    Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rapport_api::middleware::auth_middleware,
        ))
        .with_state(state)
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_subjects_public() {
    let app = test_app("list-subjects");

    let response = app
        .oneshot(post_json("/api/subjects/list", json!({}), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_create_report_requires_auth() {
    let app = test_app("create-unauth");

    let response = app
        .oneshot(post_json(
            "/api/reports/create",
            json!({
                "subjectId": "subject-1",
                "kind": "negative",
                "category": "Poor Service",
                "title": "No one answered the phone",
                "description": "I tried calling the service desk every day for a week and nobody ever picked up."
            }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_and_submit_report() {
    let app = test_app("register-submit");

    // Register an account
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({"email": "ama@example.com", "password": "a-long-password"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    // Submit a report with an embedded phone number
    let response = app
        .oneshot(post_json(
            "/api/reports/create",
            json!({
                "subjectId": "subject-1",
                "kind": "negative",
                "category": "Overcharging",
                "title": "Charged double at checkout",
                "description": "They billed my card twice for a single purchase. Call 0244123456 and ask for proof."
            }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let report = &body["data"];
    assert_eq!(report["status"], "pending");
    let description = report["description"].as_str().unwrap();
    assert!(description.contains("[PHONE_REDACTED]"));
    assert!(!description.contains("0244123456"));
}

#[tokio::test]
async fn test_admin_moderation_flow() {
    let app = test_app("moderation");

    // Pending queue holds the two seeded pending reports
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admin/pending-reports",
            json!({}),
            Some(ADMIN_TOKEN),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Approve one of them
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admin/moderate-report",
            json!({"reportId": "report-4", "decision": "approve", "notes": "checked evidence"}),
            Some(ADMIN_TOKEN),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "approved");

    // A second decision on the same report conflicts
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admin/moderate-report",
            json!({"reportId": "report-4", "decision": "reject"}),
            Some(ADMIN_TOKEN),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Approved negative report now counts against subject-1
    let response = app
        .oneshot(post_json(
            "/api/stats/subject",
            json!({"subjectId": "subject-1"}),
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["negative"], 1);
    assert_eq!(body["data"]["positive"], 1);
}

#[tokio::test]
async fn test_admin_endpoints_forbidden_for_regular_users() {
    let app = test_app("forbidden");

    // Register a regular account
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({"email": "kofi@example.com", "password": "a-long-password"}),
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(post_json("/api/admin/approve-all", json!({}), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
