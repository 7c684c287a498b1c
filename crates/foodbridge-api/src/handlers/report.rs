//! Moderation report handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::report::{Report, ReportStatus};
use foodbridge_service::report::ReportResolution;

use crate::dto::request::FileReportRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/reports
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<FileReportRequest>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    req.validate()?;

    let report = state
        .report_service
        .create(&auth, req.into_create_report(auth.user_id))
        .await?;

    Ok(Json(ApiResponse::ok(report)))
}

/// Query parameters for the moderation queue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQueueParams {
    pub status: Option<ReportStatus>,
}

/// GET /api/admin/reports
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ReportQueueParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Report>>>, ApiError> {
    let page = pagination.into_page_request();
    let reports = state
        .report_service
        .list(&auth, params.status, &page)
        .await?;
    Ok(Json(ApiResponse::ok(reports)))
}

/// PUT /api/admin/reports/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(report_id): Path<Uuid>,
    Json(resolution): Json<ReportResolution>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    let report = state
        .report_service
        .update_status(&auth, report_id, resolution)
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}
