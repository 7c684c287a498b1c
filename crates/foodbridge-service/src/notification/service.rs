//! Notification inbox operations.

use std::sync::Arc;

use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::notification::NotificationRepository;
use foodbridge_entity::notification::Notification;

use crate::context::RequestContext;

/// Handles a user's notification inbox.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notification_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notification_repo: Arc<NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// The current user's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notification_repo
            .find_by_recipient(ctx.user_id, page)
            .await
    }

    /// Count of unread notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notification_repo.count_unread(ctx.user_id).await
    }

    /// Marks one notification as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<Notification, AppError> {
        self.notification_repo
            .mark_read(notification_id, ctx.user_id)
            .await
    }

    /// Marks all notifications as read; returns how many changed.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notification_repo.mark_all_read(ctx.user_id).await
    }

    /// Deletes one notification.
    pub async fn delete(&self, ctx: &RequestContext, notification_id: Uuid) -> Result<(), AppError> {
        let deleted = self
            .notification_repo
            .delete(notification_id, ctx.user_id)
            .await?;
        if !deleted {
            return Err(AppError::not_found(format!(
                "Notification {notification_id} not found"
            )));
        }
        Ok(())
    }
}
