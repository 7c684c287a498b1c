//! Platform analytics entities.

pub mod model;

pub use model::{AnalyticsPeriod, AnalyticsSnapshot, CreateSnapshot, PlatformSummary};
