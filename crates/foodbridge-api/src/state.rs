//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use foodbridge_auth::jwt::decoder::JwtDecoder;
use foodbridge_auth::jwt::encoder::JwtEncoder;
use foodbridge_auth::password::hasher::PasswordHasher;
use foodbridge_auth::password::validator::PasswordValidator;
use foodbridge_core::config::AppConfig;

use foodbridge_database::repositories::analytics::AnalyticsRepository;
use foodbridge_database::repositories::booking::BookingRepository;
use foodbridge_database::repositories::food::FoodRepository;
use foodbridge_database::repositories::notification::NotificationRepository;
use foodbridge_database::repositories::report::ReportRepository;
use foodbridge_database::repositories::request::FoodRequestRepository;
use foodbridge_database::repositories::user::UserRepository;

use foodbridge_service::analytics::AnalyticsService;
use foodbridge_service::auth::AuthService;
use foodbridge_service::booking::BookingService;
use foodbridge_service::food::FoodService;
use foodbridge_service::notification::NotificationService;
use foodbridge_service::report::ReportService;
use foodbridge_service::request::FoodRequestService;
use foodbridge_service::user::{AdminUserService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    /// Registration, login, token refresh
    pub auth_service: Arc<AuthService>,
    /// Profile self-service
    pub user_service: Arc<UserService>,
    /// Admin account approval
    pub admin_user_service: Arc<AdminUserService>,
    /// Listing lifecycle and search
    pub food_service: Arc<FoodService>,
    /// Request lifecycle
    pub request_service: Arc<FoodRequestService>,
    /// Booking lifecycle and feedback
    pub booking_service: Arc<BookingService>,
    /// Notification inbox
    pub notification_service: Arc<NotificationService>,
    /// Moderation reports
    pub report_service: Arc<ReportService>,
    /// Platform analytics
    pub analytics_service: Arc<AnalyticsService>,
}

impl AppState {
    /// Wires repositories and services on top of a connected pool.
    pub fn build(config: Arc<AppConfig>, db_pool: PgPool) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let food_repo = Arc::new(FoodRepository::new(db_pool.clone()));
        let request_repo = Arc::new(FoodRequestRepository::new(db_pool.clone()));
        let booking_repo = Arc::new(BookingRepository::new(db_pool.clone()));
        let notification_repo = Arc::new(NotificationRepository::new(db_pool.clone()));
        let report_repo = Arc::new(ReportRepository::new(db_pool.clone()));
        let analytics_repo = Arc::new(AnalyticsRepository::new(db_pool.clone()));

        let hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            hasher.clone(),
            password_validator.clone(),
            jwt_encoder,
            jwt_decoder.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            hasher,
            password_validator,
        ));
        let admin_user_service = Arc::new(AdminUserService::new(
            user_repo.clone(),
            notification_repo.clone(),
        ));
        let food_service = Arc::new(FoodService::new(
            food_repo.clone(),
            user_repo.clone(),
            config.matching.clone(),
        ));
        let request_service = Arc::new(FoodRequestService::new(
            request_repo.clone(),
            food_repo.clone(),
            user_repo.clone(),
            notification_repo.clone(),
        ));
        let booking_service = Arc::new(BookingService::new(
            booking_repo.clone(),
            request_repo.clone(),
            food_repo.clone(),
            user_repo.clone(),
            notification_repo.clone(),
        ));
        let notification_service = Arc::new(NotificationService::new(notification_repo));
        let report_service = Arc::new(ReportService::new(report_repo.clone()));
        let analytics_service = Arc::new(AnalyticsService::new(
            analytics_repo,
            user_repo,
            food_repo,
            request_repo,
            booking_repo,
            report_repo,
        ));

        Self {
            config,
            db_pool,
            jwt_decoder,
            auth_service,
            user_service,
            admin_user_service,
            food_service,
            request_service,
            booking_service,
            notification_service,
            report_service,
            analytics_service,
        }
    }
}
