mod analytics;
mod auth;
mod config;
mod content;
mod db;
mod errors;
mod http;
mod models;
mod routes;
mod state;
mod uploads;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analytics::recorder::{EventRecorder, PgAnalyticsSink};
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::uploads::UploadStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (errors out on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize the upload areas (public/projects, public/reports, uploads)
    let uploads = UploadStore::new(&config.public_dir, &config.upload_dir);
    uploads.ensure_dirs().await?;
    info!("Upload directories ready");

    // Best-effort analytics recorder over the shared pool
    let analytics = EventRecorder::new(Arc::new(PgAnalyticsSink::new(db.clone())));

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        uploads,
        analytics,
    };

    // Build router; every endpoint permits any origin
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    // connect_info supplies the peer address for analytics IP attribution
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
