//! Moderation report entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// What is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    FoodSafety,
    NoShow,
    InappropriateContent,
    Spam,
    Harassment,
    Fraud,
    Other,
}

/// The kind of entity a report targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_target_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportTargetType {
    Food,
    User,
    Request,
}

/// How urgent the report is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for ReportSeverity {
    fn default() -> Self {
        Self::Medium
    }
}

/// Moderation workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Open,
    InProgress,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    /// States this status may move to.
    pub fn allowed_transitions(&self) -> &'static [ReportStatus] {
        match self {
            Self::Open => &[Self::InProgress, Self::Resolved, Self::Dismissed],
            Self::InProgress => &[Self::Resolved, Self::Dismissed],
            Self::Resolved | Self::Dismissed => &[],
        }
    }

    /// Check whether a transition to `next` is permitted.
    pub fn can_transition_to(&self, next: ReportStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the moderator did about a resolved report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resolution_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResolutionAction {
    NoAction,
    Warning,
    ContentRemoved,
    AccountSuspended,
    AccountBanned,
}

/// A user-filed moderation report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub report_type: ReportType,
    pub target_type: ReportTargetType,
    pub target_id: Uuid,
    /// Short title (at most 100 characters).
    pub title: String,
    /// Details (at most 1000 characters).
    pub description: String,
    pub severity: ReportSeverity,
    pub status: ReportStatus,
    /// Admin handling the report.
    pub assigned_to: Option<Uuid>,
    pub resolution_action: Option<ResolutionAction>,
    pub resolution_notes: Option<String>,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to file a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReport {
    pub reporter_id: Uuid,
    pub report_type: ReportType,
    pub target_type: ReportTargetType,
    pub target_id: Uuid,
    pub title: String,
    pub description: String,
    pub severity: ReportSeverity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_report_workflow() {
        assert!(ReportStatus::Open.can_transition_to(ReportStatus::InProgress));
        assert!(ReportStatus::InProgress.can_transition_to(ReportStatus::Resolved));
        assert!(!ReportStatus::Resolved.can_transition_to(ReportStatus::Open));
        assert!(!ReportStatus::Dismissed.can_transition_to(ReportStatus::InProgress));
    }
}
