//! Food request entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::status::{RequestPriority, RequestStatus};

/// Hours a pending request stays open before it expires.
pub const REQUEST_TTL_HOURS: i64 = 24;

/// A receiver's claim on a food listing, awaiting the donor's decision.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The listing being requested.
    pub food_id: Uuid,
    /// The receiver making the request.
    pub requester_id: Uuid,
    /// The donor who owns the listing (denormalized for inbox queries).
    pub donor_id: Uuid,
    /// Free-text quantity the receiver wants, e.g. "5kg".
    pub quantity_requested: String,
    /// Optional message to the donor (at most 500 characters).
    pub message: Option<String>,
    /// Lifecycle state.
    pub status: RequestStatus,
    /// Urgency set by the requester.
    pub priority: RequestPriority,
    /// Donor's response message, set on approval or rejection.
    pub donor_response: Option<String>,
    /// Pickup time proposed by the requester.
    pub preferred_pickup_time: Option<DateTime<Utc>>,
    /// Pickup time confirmed by the donor on approval.
    pub confirmed_pickup_time: Option<DateTime<Utc>>,
    /// When the request reached `Completed`.
    pub completed_at: Option<DateTime<Utc>>,
    /// When a still-pending request lapses.
    pub expires_at: DateTime<Utc>,
    /// Audit trail of every status change.
    pub status_history: Json<Vec<StatusChange>>,
    /// When the request was made.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FoodRequest {
    /// Expiry deadline for a request created at `created_at`.
    pub fn expiry_for(created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::hours(REQUEST_TTL_HOURS)
    }

    /// Whether the pending window has lapsed.
    pub fn is_past_expiry(&self, now: DateTime<Utc>) -> bool {
        self.status == RequestStatus::Pending && self.expires_at <= now
    }
}

/// One entry in a request's status audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: RequestStatus,
    /// Who triggered the change; `None` for system-driven expiry.
    pub changed_by: Option<Uuid>,
    pub changed_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl StatusChange {
    pub fn new(status: RequestStatus, changed_by: Option<Uuid>, note: Option<String>) -> Self {
        Self {
            status,
            changed_by,
            changed_at: Utc::now(),
            note,
        }
    }
}

/// Data required to create a new request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFoodRequest {
    pub food_id: Uuid,
    pub requester_id: Uuid,
    pub donor_id: Uuid,
    pub quantity_requested: String,
    pub message: Option<String>,
    pub priority: RequestPriority,
    pub preferred_pickup_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_24_hours_out() {
        let created = Utc::now();
        assert_eq!(
            FoodRequest::expiry_for(created),
            created + Duration::hours(24)
        );
    }

    #[test]
    fn test_status_change_records_actor() {
        let actor = Uuid::new_v4();
        let change = StatusChange::new(RequestStatus::Approved, Some(actor), None);
        assert_eq!(change.status, RequestStatus::Approved);
        assert_eq!(change.changed_by, Some(actor));
    }
}
