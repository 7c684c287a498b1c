//! User handlers — profile self-service, public profiles, and the
//! admin approval queue.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::user::{ApprovalStatus, UpdateUser};
use foodbridge_service::user::PublicProfile;

use crate::dto::request::{ApprovalDecisionRequest, ChangePasswordRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(data): Json<UpdateUser>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.update_profile(&auth, data).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// PUT /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .user_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed successfully",
    ))))
}

/// GET /api/users/{id}
pub async fn get_public_profile(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PublicProfile>>, ApiError> {
    let profile = state.user_service.get_public_profile(user_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// Query parameters for the admin approval queue.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalQueueParams {
    #[serde(default = "default_status")]
    pub status: ApprovalStatus,
}

fn default_status() -> ApprovalStatus {
    ApprovalStatus::Pending
}

/// GET /api/admin/users
pub async fn list_by_approval(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ApprovalQueueParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = pagination.into_page_request();
    let users = state
        .admin_user_service
        .list_by_approval(&auth, params.status, &page)
        .await?;
    Ok(Json(ApiResponse::ok(
        users.map(|user| UserResponse::from(&user)),
    )))
}

/// PUT /api/admin/users/{id}/approval
pub async fn decide_approval(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ApprovalDecisionRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .admin_user_service
        .decide_approval(&auth, user_id, req.approve)
        .await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
