//! Food listing handlers — search, CRUD, and cancellation.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use foodbridge_core::error::AppError;
use foodbridge_core::types::geo::GeoPoint;
use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::food::{Food, FoodCategory, UpdateFood};
use foodbridge_service::food::{FoodSearchQuery, MatchedFood};

use crate::dto::request::CreateListingRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for the public listing search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub category: Option<FoodCategory>,
    pub search: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: Option<f64>,
}

impl SearchParams {
    fn origin(&self) -> Result<Option<GeoPoint>, AppError> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng)
                .map(Some)
                .ok_or_else(|| AppError::validation("Invalid coordinates")),
            (None, None) => Ok(None),
            _ => Err(AppError::validation(
                "Both lat and lng are required for a location search",
            )),
        }
    }
}

/// GET /api/foods
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<MatchedFood>>>, ApiError> {
    let query = FoodSearchQuery {
        origin: params.origin()?,
        category: params.category,
        search: params.search,
        radius_km: params.radius_km,
    };
    let page = pagination.into_page_request();

    let result = state.food_service.search(&query, &page).await?;

    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/foods
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateListingRequest>,
) -> Result<Json<ApiResponse<Food>>, ApiError> {
    req.validate()?;

    let food = state
        .food_service
        .create(&auth, req.into_create_food(auth.user_id))
        .await?;

    Ok(Json(ApiResponse::ok(food)))
}

/// GET /api/foods/mine
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Food>>>, ApiError> {
    let page = pagination.into_page_request();
    let foods = state.food_service.list_mine(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(foods)))
}

/// Optional viewer location for listing detail.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// GET /api/foods/{id}
pub async fn get_detail(
    State(state): State<AppState>,
    Path(food_id): Path<Uuid>,
    Query(params): Query<DetailParams>,
) -> Result<Json<ApiResponse<MatchedFood>>, ApiError> {
    let origin = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
        _ => None,
    };

    let detail = state.food_service.get_detail(food_id, origin).await?;

    Ok(Json(ApiResponse::ok(detail)))
}

/// PUT /api/foods/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(food_id): Path<Uuid>,
    Json(data): Json<UpdateFood>,
) -> Result<Json<ApiResponse<Food>>, ApiError> {
    let food = state.food_service.update(&auth, food_id, data).await?;
    Ok(Json(ApiResponse::ok(food)))
}

/// DELETE /api/foods/{id}
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(food_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Food>>, ApiError> {
    let food = state.food_service.cancel(&auth, food_id).await?;
    Ok(Json(ApiResponse::ok(food)))
}
