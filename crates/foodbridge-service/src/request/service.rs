//! Food request use cases: claiming listings and the donor decision flow.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::food::FoodRepository;
use foodbridge_database::repositories::notification::NotificationRepository;
use foodbridge_database::repositories::request::FoodRequestRepository;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_entity::notification::model::CreateNotification;
use foodbridge_entity::notification::NotificationKind;
use foodbridge_entity::request::model::{CreateFoodRequest, StatusChange};
use foodbridge_entity::request::{FoodRequest, RequestPriority, RequestStatus};

use crate::context::RequestContext;

/// The donor's decision on a pending request.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RequestDecision {
    /// True to approve, false to reject.
    pub approve: bool,
    /// Optional response message to the requester.
    pub response: Option<String>,
    /// Confirmed pickup time, on approval.
    pub confirmed_pickup_time: Option<DateTime<Utc>>,
}

/// Handles the request lifecycle from claim to donor decision.
#[derive(Debug, Clone)]
pub struct FoodRequestService {
    request_repo: Arc<FoodRequestRepository>,
    food_repo: Arc<FoodRepository>,
    user_repo: Arc<UserRepository>,
    notification_repo: Arc<NotificationRepository>,
}

impl FoodRequestService {
    /// Creates a new request service.
    pub fn new(
        request_repo: Arc<FoodRequestRepository>,
        food_repo: Arc<FoodRepository>,
        user_repo: Arc<UserRepository>,
        notification_repo: Arc<NotificationRepository>,
    ) -> Self {
        Self {
            request_repo,
            food_repo,
            user_repo,
            notification_repo,
        }
    }

    /// Claims a listing for the current receiver.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        food_id: Uuid,
        quantity_requested: String,
        message: Option<String>,
        priority: RequestPriority,
        preferred_pickup_time: Option<DateTime<Utc>>,
    ) -> Result<FoodRequest, AppError> {
        let requester = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;
        if !requester.role.can_request() {
            return Err(AppError::forbidden("Only receivers can request food"));
        }
        if !requester.can_participate() {
            return Err(AppError::forbidden("Account is not approved"));
        }

        let food = self
            .food_repo
            .find_by_id(food_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Food {food_id} not found")))?;
        if !food.is_available() {
            return Err(AppError::conflict("Food is no longer available"));
        }
        if food.is_past_expiry(Utc::now()) {
            return Err(AppError::conflict("Food has expired"));
        }
        if food.donor_id == ctx.user_id {
            return Err(AppError::validation("Cannot request your own listing"));
        }
        if let Some(message) = &message {
            if message.len() > 500 {
                return Err(AppError::validation(
                    "Message must be at most 500 characters",
                ));
            }
        }

        let request = self
            .request_repo
            .create(&CreateFoodRequest {
                food_id,
                requester_id: ctx.user_id,
                donor_id: food.donor_id,
                quantity_requested,
                message,
                priority,
                preferred_pickup_time,
            })
            .await?;

        self.notification_repo
            .create(
                &CreateNotification::new(
                    food.donor_id,
                    NotificationKind::NewRequest,
                    "New food request",
                    format!("{} requested \"{}\"", requester.display_name(), food.title),
                )
                .from_sender(ctx.user_id)
                .about_food(food_id)
                .about_request(request.id),
            )
            .await?;

        info!(request_id = %request.id, food_id = %food_id, "Request created");

        Ok(request)
    }

    /// The current user's own requests.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<FoodRequest>, AppError> {
        self.request_repo.find_by_requester(ctx.user_id, page).await
    }

    /// Requests incoming to the current donor.
    pub async fn list_incoming(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<FoodRequest>, AppError> {
        self.request_repo.find_by_donor(ctx.user_id, page).await
    }

    /// Request detail, visible to the participants only.
    pub async fn get(&self, ctx: &RequestContext, request_id: Uuid) -> Result<FoodRequest, AppError> {
        let request = self.find(request_id).await?;
        if request.requester_id != ctx.user_id
            && request.donor_id != ctx.user_id
            && !ctx.is_admin()
        {
            return Err(AppError::forbidden("Not a participant in this request"));
        }
        Ok(request)
    }

    /// The donor's approve/reject decision on a pending request.
    ///
    /// Approval reserves the listing in the same transaction as the
    /// status write; the requester is notified either way.
    pub async fn decide(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        decision: RequestDecision,
    ) -> Result<FoodRequest, AppError> {
        let request = self.find(request_id).await?;
        if request.donor_id != ctx.user_id {
            return Err(AppError::forbidden("Only the donor can decide this request"));
        }
        if let Some(response) = &decision.response {
            if response.len() > 300 {
                return Err(AppError::validation(
                    "Response must be at most 300 characters",
                ));
            }
        }

        let next = if decision.approve {
            RequestStatus::Approved
        } else {
            RequestStatus::Rejected
        };
        if !request.status.can_transition_to(next) {
            return Err(AppError::conflict(format!(
                "Cannot move a {} request to {next}",
                request.status
            )));
        }

        let change = StatusChange::new(next, Some(ctx.user_id), decision.response.clone());

        let updated = if decision.approve {
            self.request_repo
                .approve(
                    request_id,
                    decision.response.as_deref(),
                    decision.confirmed_pickup_time,
                    &change,
                )
                .await?
        } else {
            self.request_repo
                .reject(request_id, decision.response.as_deref(), &change)
                .await?
        };

        let (kind, title, message) = if decision.approve {
            (
                NotificationKind::RequestApproved,
                "Request approved",
                "Your food request was approved. Arrange the pickup with the donor.",
            )
        } else {
            (
                NotificationKind::RequestRejected,
                "Request rejected",
                "Your food request was not approved.",
            )
        };

        self.notification_repo
            .create(
                &CreateNotification::new(updated.requester_id, kind, title, message)
                    .from_sender(ctx.user_id)
                    .about_food(updated.food_id)
                    .about_request(updated.id),
            )
            .await?;

        info!(request_id = %request_id, status = %updated.status, "Request decided");

        Ok(updated)
    }

    /// The requester withdraws their own pending request.
    pub async fn cancel(&self, ctx: &RequestContext, request_id: Uuid) -> Result<FoodRequest, AppError> {
        let request = self.find(request_id).await?;
        if request.requester_id != ctx.user_id {
            return Err(AppError::forbidden("Only the requester can cancel"));
        }
        // Approved requests are cancelled through their booking, which
        // also releases the reserved listing.
        if request.status != RequestStatus::Pending {
            return Err(AppError::conflict(format!(
                "Cannot cancel a {} request",
                request.status
            )));
        }

        let change = StatusChange::new(RequestStatus::Cancelled, Some(ctx.user_id), None);
        let cancelled = self
            .request_repo
            .transition_status(request_id, request.status, RequestStatus::Cancelled, &change)
            .await?;

        info!(request_id = %request_id, "Request cancelled");

        Ok(cancelled)
    }

    async fn find(&self, request_id: Uuid) -> Result<FoodRequest, AppError> {
        self.request_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))
    }
}
