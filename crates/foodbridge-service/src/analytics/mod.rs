//! Platform analytics: live summary and persisted snapshots.

pub mod service;

pub use service::AnalyticsService;
