//! Food request handlers — claim, list, decide, cancel.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::request::FoodRequest;
use foodbridge_service::request::RequestDecision;

use crate::dto::request::ClaimFoodRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/foods/{id}/request
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(food_id): Path<Uuid>,
    Json(req): Json<ClaimFoodRequest>,
) -> Result<Json<ApiResponse<FoodRequest>>, ApiError> {
    req.validate()?;

    let request = state
        .request_service
        .create(
            &auth,
            food_id,
            req.quantity_requested,
            req.message,
            req.priority,
            req.preferred_pickup_time,
        )
        .await?;

    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/foods/requests/my
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<FoodRequest>>>, ApiError> {
    let page = pagination.into_page_request();
    let requests = state.request_service.list_mine(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/foods/requests/incoming
pub async fn list_incoming(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<FoodRequest>>>, ApiError> {
    let page = pagination.into_page_request();
    let requests = state.request_service.list_incoming(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/foods/requests/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FoodRequest>>, ApiError> {
    let request = state.request_service.get(&auth, request_id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PUT /api/foods/requests/{id}/status
pub async fn decide(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
    Json(decision): Json<RequestDecision>,
) -> Result<Json<ApiResponse<FoodRequest>>, ApiError> {
    let request = state
        .request_service
        .decide(&auth, request_id, decision)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// DELETE /api/foods/requests/{id}
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FoodRequest>>, ApiError> {
    let request = state.request_service.cancel(&auth, request_id).await?;
    Ok(Json(ApiResponse::ok(request)))
}
