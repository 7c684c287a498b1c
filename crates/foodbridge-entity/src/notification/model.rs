//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::{NotificationKind, NotificationPriority};

/// An in-app notification for a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    /// Who the notification is for.
    pub recipient_id: Uuid,
    /// Who triggered it; `None` for system notifications.
    pub sender_id: Option<Uuid>,
    pub kind: NotificationKind,
    /// Short title (at most 100 characters).
    pub title: String,
    /// Body text (at most 500 characters).
    pub message: String,
    /// Related listing, if any.
    pub food_id: Option<Uuid>,
    /// Related request, if any.
    pub request_id: Option<Uuid>,
    pub priority: NotificationPriority,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub food_id: Option<Uuid>,
    pub request_id: Option<Uuid>,
    pub priority: NotificationPriority,
}

impl CreateNotification {
    /// Build a notification with the kind's default priority.
    pub fn new(
        recipient_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            sender_id: None,
            kind,
            title: title.into(),
            message: message.into(),
            food_id: None,
            request_id: None,
            priority: kind.default_priority(),
        }
    }

    pub fn from_sender(mut self, sender_id: Uuid) -> Self {
        self.sender_id = Some(sender_id);
        self
    }

    pub fn about_food(mut self, food_id: Uuid) -> Self {
        self.food_id = Some(food_id);
        self
    }

    pub fn about_request(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_carries_context() {
        let recipient = Uuid::new_v4();
        let sender = Uuid::new_v4();
        let food = Uuid::new_v4();
        let notification =
            CreateNotification::new(recipient, NotificationKind::NewRequest, "t", "m")
                .from_sender(sender)
                .about_food(food);
        assert_eq!(notification.sender_id, Some(sender));
        assert_eq!(notification.food_id, Some(food));
        assert_eq!(notification.priority, NotificationPriority::Medium);
    }
}
