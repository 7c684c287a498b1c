//! # foodbridge-service
//!
//! Business logic service layer for FoodBridge. Each service orchestrates
//! repositories and authentication to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod analytics;
pub mod auth;
pub mod booking;
pub mod context;
pub mod food;
pub mod notification;
pub mod report;
pub mod request;
pub mod user;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use booking::BookingService;
pub use context::RequestContext;
pub use food::{FoodService, MatchedFood};
pub use notification::NotificationService;
pub use report::ReportService;
pub use request::FoodRequestService;
pub use user::{AdminUserService, UserService};
