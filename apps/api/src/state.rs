use sqlx::PgPool;

use crate::analytics::recorder::EventRecorder;
use crate::config::Config;
use crate::uploads::UploadStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Every service is constructed once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub uploads: UploadStore,
    /// Best-effort analytics sink. Recording failures never surface to callers.
    pub analytics: EventRecorder,
}
