use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analytics::summary::{self, AnalyticsSummary};
use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::http::{client_ip, user_agent};
use crate::models::analytics::{ClickType, NewPageView, NewProjectClick};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageViewPayload {
    pub page: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectClickPayload {
    pub project_id: i32,
    pub click_type: ClickType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// POST /api/analytics/pageview
/// Always answers 201 once the body parses; recording is best-effort.
pub async fn record_page_view(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<PageViewPayload>,
) -> (StatusCode, Json<Value>) {
    state
        .analytics
        .record_page_view(NewPageView {
            page: payload.page,
            user_agent: user_agent(&headers),
            ip_address: Some(client_ip(&headers, peer)),
        })
        .await;
    (StatusCode::CREATED, Json(json!({ "success": true })))
}

/// POST /api/analytics/project-click
/// The project id is not validated; clicks on deleted projects are kept.
pub async fn record_project_click(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<ProjectClickPayload>,
) -> (StatusCode, Json<Value>) {
    state
        .analytics
        .record_project_click(NewProjectClick {
            project_id: payload.project_id,
            click_type: payload.click_type,
            user_agent: user_agent(&headers),
            ip_address: Some(client_ip(&headers, peer)),
        })
        .await;
    (StatusCode::CREATED, Json(json!({ "success": true })))
}

/// GET /api/analytics/summary?startDate=…&endDate=…
pub async fn analytics_summary(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let (start, end) =
        summary::resolve_range(query.start_date.as_deref(), query.end_date.as_deref());
    let report = summary::summarize(&state.db, start, end).await?;
    Ok(Json(report))
}
