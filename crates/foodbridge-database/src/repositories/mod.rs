//! Repository implementations for all FoodBridge entities.

pub mod analytics;
pub mod booking;
pub mod food;
pub mod notification;
pub mod report;
pub mod request;
pub mod user;

pub use analytics::AnalyticsRepository;
pub use booking::BookingRepository;
pub use food::FoodRepository;
pub use notification::NotificationRepository;
pub use report::ReportRepository;
pub use request::FoodRequestRepository;
pub use user::UserRepository;
