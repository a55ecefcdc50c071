pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::auth;
use crate::content::handlers as content;
use crate::state::AppState;
use crate::uploads::MAX_FILE_BYTES;

/// Whole-request cap for multipart writes: one image + one report at the
/// per-file ceiling, plus headroom for the text fields.
const MAX_REQUEST_BYTES: usize = 2 * MAX_FILE_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/auth/user", get(auth::current_user))
        // Content API
        .route(
            "/api/projects",
            get(content::list_projects).post(content::create_project),
        )
        .route(
            "/api/projects/:id",
            get(content::get_project)
                .put(content::update_project)
                .patch(content::update_project)
                .delete(content::delete_project),
        )
        .route(
            "/api/projects/:id/files",
            get(content::list_project_files).post(content::upload_project_file),
        )
        .route(
            "/api/project-files/:id",
            axum::routing::delete(content::delete_project_file),
        )
        .route(
            "/api/site-settings",
            get(content::get_site_settings).post(content::upsert_site_settings),
        )
        // Analytics
        .route("/api/analytics/pageview", post(analytics::record_page_view))
        .route(
            "/api/analytics/project-click",
            post(analytics::record_project_click),
        )
        .route(
            "/api/analytics/summary",
            get(analytics::analytics_summary),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}
