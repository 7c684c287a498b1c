//! Admin account management — the receiver approval queue.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::notification::NotificationRepository;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_entity::notification::model::CreateNotification;
use foodbridge_entity::notification::NotificationKind;
use foodbridge_entity::user::{ApprovalStatus, User};

use crate::context::RequestContext;

/// Admin operations on user accounts.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    user_repo: Arc<UserRepository>,
    notification_repo: Arc<NotificationRepository>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        notification_repo: Arc<NotificationRepository>,
    ) -> Self {
        Self {
            user_repo,
            notification_repo,
        }
    }

    /// Lists users by approval status. Admin only.
    pub async fn list_by_approval(
        &self,
        ctx: &RequestContext,
        status: ApprovalStatus,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.require_admin(ctx)?;
        self.user_repo.find_by_approval_status(status, page).await
    }

    /// Approves or rejects a pending account and notifies the user.
    pub async fn decide_approval(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        approve: bool,
    ) -> Result<User, AppError> {
        self.require_admin(ctx)?;

        let status = if approve {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Rejected
        };

        let user = self
            .user_repo
            .update_approval(user_id, status, ctx.user_id)
            .await?;

        let (kind, title, message) = if approve {
            (
                NotificationKind::AccountApproved,
                "Account approved",
                "Your account has been approved. You can now request food donations.",
            )
        } else {
            (
                NotificationKind::AccountRejected,
                "Account rejected",
                "Your account application was not approved. Contact support for details.",
            )
        };

        self.notification_repo
            .create(&CreateNotification::new(user.id, kind, title, message).from_sender(ctx.user_id))
            .await?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user.id,
            status = %status,
            "Approval decision recorded"
        );

        Ok(user)
    }

    fn require_admin(&self, ctx: &RequestContext) -> Result<(), AppError> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden("Admin access required"));
        }
        Ok(())
    }
}
