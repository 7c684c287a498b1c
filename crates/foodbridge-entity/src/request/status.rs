//! Request lifecycle state machine and priority.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a food request.
///
/// The transition table is the single source of truth for which status
/// writes are legal; terminal states accept no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Waiting for the donor's decision.
    Pending,
    /// Accepted by the donor; pickup can be booked.
    Approved,
    /// Declined by the donor.
    Rejected,
    /// Pickup completed.
    Completed,
    /// Withdrawn by the requester or donor.
    Cancelled,
    /// The 24-hour decision window lapsed.
    Expired,
}

impl RequestStatus {
    /// States this status may move to.
    pub fn allowed_transitions(&self) -> &'static [RequestStatus] {
        match self {
            Self::Pending => &[
                Self::Approved,
                Self::Rejected,
                Self::Cancelled,
                Self::Expired,
            ],
            Self::Approved => &[Self::Completed, Self::Cancelled, Self::Expired],
            Self::Rejected | Self::Completed | Self::Cancelled | Self::Expired => &[],
        }
    }

    /// Check whether a transition to `next` is permitted.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Check if the request is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Check if the request still counts against the one-active-request
    /// limit per (food, requester) pair.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "expired" => Ok(Self::Expired),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid request status: '{s}'"
            ))),
        }
    }
}

/// Urgency of a food request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl RequestPriority {
    /// Return the priority as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl Default for RequestPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for RequestPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Completed));
    }

    #[test]
    fn test_approved_transitions() {
        assert!(RequestStatus::Approved.can_transition_to(RequestStatus::Completed));
        assert!(RequestStatus::Approved.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Pending));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Rejected));
    }

    #[test]
    fn test_terminal_states_refuse_everything() {
        let all = [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::Completed,
            RequestStatus::Cancelled,
            RequestStatus::Expired,
        ];
        for terminal in [
            RequestStatus::Rejected,
            RequestStatus::Completed,
            RequestStatus::Cancelled,
            RequestStatus::Expired,
        ] {
            assert!(terminal.is_terminal());
            for next in all {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_only_pending_is_active() {
        assert!(RequestStatus::Pending.is_active());
        assert!(!RequestStatus::Approved.is_active());
        assert!(!RequestStatus::Completed.is_active());
    }
}
