//! Moderation report workflow.

pub mod service;

pub use service::{ReportService, ReportResolution};
