//! Platform analytics handlers. Admin only.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::analytics::{AnalyticsPeriod, AnalyticsSnapshot, PlatformSummary};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/analytics/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<PlatformSummary>>, ApiError> {
    let summary = state.analytics_service.summary(&auth).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// Payload for taking a snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotRequest {
    pub period: AnalyticsPeriod,
}

/// POST /api/admin/analytics/snapshot
pub async fn take_snapshot(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SnapshotRequest>,
) -> Result<Json<ApiResponse<AnalyticsSnapshot>>, ApiError> {
    let snapshot = state
        .analytics_service
        .take_snapshot(&auth, req.period)
        .await?;
    Ok(Json(ApiResponse::ok(snapshot)))
}

/// GET /api/admin/analytics
pub async fn list_snapshots(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<AnalyticsSnapshot>>>, ApiError> {
    let page = pagination.into_page_request();
    let snapshots = state.analytics_service.list_snapshots(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(snapshots)))
}
