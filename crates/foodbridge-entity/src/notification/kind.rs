//! Notification kind and priority enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewRequest,
    RequestApproved,
    RequestRejected,
    FoodReserved,
    PickupScheduled,
    PickupCompleted,
    FoodExpired,
    AccountApproved,
    AccountRejected,
    SystemMessage,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewRequest => "new_request",
            Self::RequestApproved => "request_approved",
            Self::RequestRejected => "request_rejected",
            Self::FoodReserved => "food_reserved",
            Self::PickupScheduled => "pickup_scheduled",
            Self::PickupCompleted => "pickup_completed",
            Self::FoodExpired => "food_expired",
            Self::AccountApproved => "account_approved",
            Self::AccountRejected => "account_rejected",
            Self::SystemMessage => "system_message",
        }
    }

    /// Default delivery priority for this kind.
    pub fn default_priority(&self) -> NotificationPriority {
        match self {
            Self::RequestApproved | Self::PickupScheduled | Self::AccountApproved => {
                NotificationPriority::High
            }
            Self::SystemMessage => NotificationPriority::Low,
            _ => NotificationPriority::Medium,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Delivery priority of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

impl Default for NotificationPriority {
    fn default() -> Self {
        Self::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_priorities() {
        assert_eq!(
            NotificationKind::RequestApproved.default_priority(),
            NotificationPriority::High
        );
        assert_eq!(
            NotificationKind::NewRequest.default_priority(),
            NotificationPriority::Medium
        );
        assert_eq!(
            NotificationKind::SystemMessage.default_priority(),
            NotificationPriority::Low
        );
    }
}
