//! Moderation report entity and its enums.

pub mod model;

pub use model::{
    CreateReport, Report, ReportSeverity, ReportStatus, ReportTargetType, ReportType,
    ResolutionAction,
};
