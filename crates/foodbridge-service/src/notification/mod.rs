//! Notification delivery and inbox management.

pub mod service;

pub use service::NotificationService;
