//! Dashboard-facing HTTP routes.
//!
//! Thin handlers: each one forwards to the upstream client and returns the
//! normalized payload as JSON. Error mapping lives in [`crate::error`].

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use vms_client::{
    AnalyticsConfig, AnalyticsCounter, AnalyticsEvent, AuditLog, AuditSearchParams, Bookmark,
    BookmarkSearchParams, Camera, CameraGroup, DashboardStats, EventSearchParams, NewBookmark,
    SystemStatus, VmsClient,
};

use crate::error::UpstreamGateway;

#[derive(Clone)]
pub struct AppState {
    pub client: VmsClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/system/status", get(system_status))
        .route("/api/cameras", get(cameras))
        .route("/api/cameras/groups", get(camera_groups))
        .route("/api/cameras/:name/status", get(camera_status))
        .route("/api/cameras/:name/activation", post(camera_activation))
        .route(
            "/api/analytics/configurations",
            get(analytics_configurations),
        )
        .route("/api/analytics/counters", get(analytics_counters))
        .route("/api/analytics/counters/:id/reset", post(reset_counter))
        .route("/api/analytics/events", get(events))
        .route("/api/analytics/events/recent", get(recent_events))
        .route("/api/analytics/chart", get(chart))
        .route("/api/audit/logs", get(audit_logs))
        .route("/api/bookmarks", get(bookmarks).post(add_bookmark))
        .route("/api/bookmarks/:id", delete(delete_bookmark))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, UpstreamGateway> {
    Ok(Json(state.client.dashboard_stats().await?))
}

async fn system_status(
    State(state): State<AppState>,
) -> Result<Json<SystemStatus>, UpstreamGateway> {
    Ok(Json(state.client.system_status().await?))
}

async fn cameras(State(state): State<AppState>) -> Result<Json<Vec<Camera>>, UpstreamGateway> {
    Ok(Json(state.client.get_cameras().await?))
}

async fn camera_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<CameraGroup>>, UpstreamGateway> {
    Ok(Json(state.client.get_groups().await?))
}

/// `null` when the upstream does not know the camera.
async fn camera_status(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Option<Camera>>, UpstreamGateway> {
    Ok(Json(state.client.get_camera_status(&name).await?))
}

#[derive(Debug, Deserialize)]
struct ActivationBody {
    action: String,
}

async fn camera_activation(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<ActivationBody>,
) -> Result<Json<Value>, UpstreamGateway> {
    Ok(Json(
        state
            .client
            .set_camera_activation(&name, &body.action)
            .await?,
    ))
}

async fn analytics_configurations(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalyticsConfig>>, UpstreamGateway> {
    Ok(Json(state.client.get_analytics_configurations().await?))
}

async fn analytics_counters(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalyticsCounter>>, UpstreamGateway> {
    Ok(Json(state.client.get_counters().await?))
}

async fn reset_counter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, UpstreamGateway> {
    Ok(Json(state.client.reset_counter(&id).await?))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct EventQuery {
    start_date: Option<String>,
    end_date: Option<String>,
    cameras: Option<String>,
    event_types: Option<String>,
}

async fn events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<Vec<AnalyticsEvent>>, UpstreamGateway> {
    let params = EventSearchParams {
        start_date: query.start_date,
        end_date: query.end_date,
        cameras: query.cameras,
        event_types: query.event_types,
    };
    Ok(Json(state.client.search_events(&params).await?))
}

async fn recent_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalyticsEvent>>, UpstreamGateway> {
    Ok(Json(state.client.recent_events().await?))
}

async fn chart(State(state): State<AppState>) -> Result<Json<Value>, UpstreamGateway> {
    Ok(Json(state.client.chart_data().await?))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AuditQuery {
    start_date: Option<String>,
    end_date: Option<String>,
    category: Option<String>,
    keyword: Option<String>,
}

async fn audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditLog>>, UpstreamGateway> {
    let params = AuditSearchParams {
        start_date: query.start_date,
        end_date: query.end_date,
        category: query.category,
        keyword: query.keyword,
    };
    Ok(Json(state.client.search_audit_logs(&params).await?))
}

#[derive(Debug, Deserialize, Default)]
struct BookmarkQuery {
    keyword: Option<String>,
    colors: Option<String>,
}

async fn bookmarks(
    State(state): State<AppState>,
    Query(query): Query<BookmarkQuery>,
) -> Result<Json<Vec<Bookmark>>, UpstreamGateway> {
    let params = BookmarkSearchParams {
        keyword: query.keyword,
        colors: query.colors,
    };
    Ok(Json(state.client.search_bookmarks(&params).await?))
}

async fn add_bookmark(
    State(state): State<AppState>,
    Json(bookmark): Json<NewBookmark>,
) -> Result<Json<Value>, UpstreamGateway> {
    Ok(Json(state.client.add_bookmark(&bookmark).await?))
}

async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, UpstreamGateway> {
    Ok(Json(state.client.delete_bookmark(&id).await?))
}
