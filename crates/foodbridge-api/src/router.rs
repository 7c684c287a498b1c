//! Route definitions for the FoodBridge HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(food_routes())
        .merge(request_routes())
        .merge(booking_routes())
        .merge(notification_routes())
        .merge(report_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// User self-service and public profiles
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::get_profile))
        .route("/users/me", put(handlers::user::update_profile))
        .route("/users/me/password", put(handlers::user::change_password))
        .route("/users/{id}", get(handlers::user::get_public_profile))
}

/// Listing search and CRUD
fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(handlers::food::search))
        .route("/foods", post(handlers::food::create))
        .route("/foods/mine", get(handlers::food::list_mine))
        .route("/foods/{id}", get(handlers::food::get_detail))
        .route("/foods/{id}", put(handlers::food::update))
        .route("/foods/{id}", delete(handlers::food::cancel))
}

/// Request lifecycle
fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/foods/{id}/request", post(handlers::request::create))
        .route("/foods/requests/my", get(handlers::request::list_mine))
        .route(
            "/foods/requests/incoming",
            get(handlers::request::list_incoming),
        )
        .route("/foods/requests/{id}", get(handlers::request::get))
        .route("/foods/requests/{id}", delete(handlers::request::cancel))
        .route(
            "/foods/requests/{id}/status",
            put(handlers::request::decide),
        )
}

/// Booking lifecycle and feedback
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(handlers::booking::create))
        .route("/bookings/my", get(handlers::booking::list_mine))
        .route("/bookings/{id}", get(handlers::booking::get))
        .route("/bookings/{id}/status", put(handlers::booking::transition))
        .route(
            "/bookings/{id}/feedback",
            post(handlers::booking::give_feedback),
        )
}

/// Notification inbox
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list))
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete),
        )
}

/// Report filing (moderation queue lives under /admin)
fn report_routes() -> Router<AppState> {
    Router::new().route("/reports", post(handlers::report::create))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::user::list_by_approval))
        .route(
            "/admin/users/{id}/approval",
            put(handlers::user::decide_approval),
        )
        .route("/admin/reports", get(handlers::report::list))
        .route(
            "/admin/reports/{id}/status",
            put(handlers::report::update_status),
        )
        .route(
            "/admin/analytics/summary",
            get(handlers::analytics::summary),
        )
        .route(
            "/admin/analytics/snapshot",
            post(handlers::analytics::take_snapshot),
        )
        .route("/admin/analytics", get(handlers::analytics::list_snapshots))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allows_any_origin() {
        cors = cors.allow_origin(Any).allow_headers(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins).allow_headers(Any);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
