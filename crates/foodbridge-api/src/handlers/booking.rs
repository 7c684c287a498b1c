//! Booking handlers — creation, lifecycle transitions, and feedback.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::booking::{Booking, BookingFeedback, CreateBooking};
use foodbridge_service::booking::BookingTransition;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(data): Json<CreateBooking>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = state.booking_service.create(&auth, data).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// GET /api/bookings/my
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Booking>>>, ApiError> {
    let page = pagination.into_page_request();
    let bookings = state.booking_service.list_mine(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// GET /api/bookings/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = state.booking_service.get(&auth, booking_id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// PUT /api/bookings/{id}/status
pub async fn transition(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
    Json(transition): Json<BookingTransition>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = state
        .booking_service
        .transition(&auth, booking_id, transition)
        .await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// POST /api/bookings/{id}/feedback
pub async fn give_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
    Json(feedback): Json<BookingFeedback>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = state
        .booking_service
        .give_feedback(&auth, booking_id, feedback)
        .await?;
    Ok(Json(ApiResponse::ok(booking)))
}
