//! Analytics snapshot and live summary models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Aggregation window of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "analytics_period", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl AnalyticsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// A persisted point-in-time aggregate of platform activity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalyticsSnapshot {
    pub id: Uuid,
    /// The day the snapshot covers.
    pub snapshot_date: NaiveDate,
    pub period: AnalyticsPeriod,
    pub foods_posted: i64,
    pub foods_donated: i64,
    pub foods_expired: i64,
    /// Listing counts keyed by category name.
    pub foods_by_category: Json<BTreeMap<String, i64>>,
    pub total_users: i64,
    pub new_users: i64,
    pub active_users: i64,
    pub total_donors: i64,
    pub total_receivers: i64,
    pub pending_approvals: i64,
    pub total_requests: i64,
    pub approved_requests: i64,
    pub rejected_requests: i64,
    pub completed_requests: i64,
    pub created_at: DateTime<Utc>,
}

/// Data required to persist a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnapshot {
    pub snapshot_date: NaiveDate,
    pub period: AnalyticsPeriod,
    pub foods_posted: i64,
    pub foods_donated: i64,
    pub foods_expired: i64,
    pub foods_by_category: BTreeMap<String, i64>,
    pub total_users: i64,
    pub new_users: i64,
    pub active_users: i64,
    pub total_donors: i64,
    pub total_receivers: i64,
    pub pending_approvals: i64,
    pub total_requests: i64,
    pub approved_requests: i64,
    pub rejected_requests: i64,
    pub completed_requests: i64,
}

/// Current platform counts, computed on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSummary {
    pub total_users: i64,
    pub total_donors: i64,
    pub total_receivers: i64,
    pub pending_approvals: i64,
    pub active_listings: i64,
    pub total_listings: i64,
    pub foods_donated: i64,
    pub foods_expired: i64,
    pub total_requests: i64,
    pub pending_requests: i64,
    pub completed_requests: i64,
    pub total_bookings: i64,
    pub completed_bookings: i64,
    pub open_reports: i64,
}
