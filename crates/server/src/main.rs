//! Rapport server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, middleware};
use rapport_api::{middleware::AppState, router as api_router};
use rapport_common::{Config, LocalStorage, StorageBackend};
use rapport_core::{
    AccountService, EvidenceService, ModerationService, ReplyService, ReportService, StatsService,
    SubjectService,
};
use rapport_db::repositories::UserRepository;
use rapport_db::store::{MemoryStore, PgStore, ReportStore, ResilientStore};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Connect to the configured database and compose the report store.
///
/// An unconfigured or unreachable database degrades to the seeded in-memory
/// store; a reachable one is wrapped with the in-memory fallback when the
/// fallback is enabled.
async fn build_store(config: &Config) -> (Arc<dyn ReportStore>, Option<UserRepository>) {
    if !config.database.enabled || config.database.url.is_empty() {
        warn!("database disabled or unconfigured, running on the in-memory store");
        return (Arc::new(MemoryStore::seeded()), None);
    }

    match rapport_db::init(config).await {
        Ok(db) => {
            let db = Arc::new(db);

            if let Err(e) = rapport_db::migrate(&db).await {
                warn!(error = %e, "migrations failed, running on the in-memory store");
                return (Arc::new(MemoryStore::seeded()), None);
            }

            let pg = PgStore::new(Arc::clone(&db));
            let users = pg.users().clone();

            let store: Arc<dyn ReportStore> = if config.fallback.enabled {
                Arc::new(ResilientStore::new(
                    Arc::new(pg),
                    Arc::new(MemoryStore::seeded()),
                ))
            } else {
                Arc::new(pg)
            };

            info!("Connected to database");
            (store, Some(users))
        }
        Err(e) => {
            warn!(error = %e, "database unreachable, running on the in-memory store");
            (Arc::new(MemoryStore::seeded()), None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rapport=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting rapport server...");

    // Load .env if present, then configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    let (store, users) = build_store(&config).await;

    // Evidence file storage
    let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::new(
        PathBuf::from(&config.storage.base_path),
        config.storage.base_url.clone(),
    ));

    // Initialize services
    let subject_service = SubjectService::new(Arc::clone(&store));
    let report_service = ReportService::new(Arc::clone(&store));
    let reply_service = ReplyService::new(Arc::clone(&store));
    let evidence_service = EvidenceService::new(Arc::clone(&store), storage);
    let moderation_service = ModerationService::new(Arc::clone(&store));
    let stats_service = StatsService::new(Arc::clone(&store));
    let account_service = AccountService::new(
        users,
        PathBuf::from(&config.fallback.credentials_path),
    );

    // Create app state
    let state = AppState {
        subject_service,
        report_service,
        reply_service,
        evidence_service,
        moderation_service,
        stats_service,
        account_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rapport_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
