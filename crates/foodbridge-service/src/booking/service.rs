//! Booking use cases: scheduling, pickup tracking, completion, feedback.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::booking::{BookingRepository, CompletionDetails};
use foodbridge_database::repositories::food::FoodRepository;
use foodbridge_database::repositories::notification::NotificationRepository;
use foodbridge_database::repositories::request::FoodRequestRepository;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_entity::booking::model::{BookingFeedback, CreateBooking};
use foodbridge_entity::booking::{Booking, BookingStatus};
use foodbridge_entity::notification::model::CreateNotification;
use foodbridge_entity::notification::NotificationKind;
use foodbridge_entity::request::model::StatusChange;
use foodbridge_entity::request::RequestStatus;

use crate::context::RequestContext;

/// A requested booking status change with its optional details.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BookingTransition {
    pub status: BookingStatus,
    /// Completion details, used when moving to completed.
    pub actual_quantity: Option<String>,
    pub notes: Option<String>,
    /// Cancellation reason, used when moving to cancelled.
    pub reason: Option<String>,
}

/// Handles the booking lifecycle.
#[derive(Debug, Clone)]
pub struct BookingService {
    booking_repo: Arc<BookingRepository>,
    request_repo: Arc<FoodRequestRepository>,
    food_repo: Arc<FoodRepository>,
    user_repo: Arc<UserRepository>,
    notification_repo: Arc<NotificationRepository>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        booking_repo: Arc<BookingRepository>,
        request_repo: Arc<FoodRequestRepository>,
        food_repo: Arc<FoodRepository>,
        user_repo: Arc<UserRepository>,
        notification_repo: Arc<NotificationRepository>,
    ) -> Self {
        Self {
            booking_repo,
            request_repo,
            food_repo,
            user_repo,
            notification_repo,
        }
    }

    /// The donor converts an approved request into a booking.
    pub async fn create(&self, ctx: &RequestContext, data: CreateBooking) -> Result<Booking, AppError> {
        let request = self
            .request_repo
            .find_by_id(data.request_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Request {} not found", data.request_id))
            })?;

        if request.donor_id != ctx.user_id {
            return Err(AppError::forbidden("Only the donor can create a booking"));
        }
        if request.status != RequestStatus::Approved {
            return Err(AppError::conflict(format!(
                "Request must be approved, is {}",
                request.status
            )));
        }
        if data.quantity_value <= 0.0 {
            return Err(AppError::validation("Quantity must be positive"));
        }

        let booking = self
            .booking_repo
            .create(&data, request.food_id, request.donor_id, request.requester_id)
            .await?;

        self.notification_repo
            .create(
                &CreateNotification::new(
                    booking.receiver_id,
                    NotificationKind::PickupScheduled,
                    "Pickup booked",
                    format!("Your pickup is booked under reference {}", booking.reference),
                )
                .from_sender(ctx.user_id)
                .about_food(booking.food_id)
                .about_request(booking.request_id),
            )
            .await?;

        info!(booking_id = %booking.id, reference = %booking.reference, "Booking created");

        Ok(booking)
    }

    /// Bookings where the current user is donor or receiver.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Booking>, AppError> {
        self.booking_repo.find_by_participant(ctx.user_id, page).await
    }

    /// Booking detail, visible to participants only.
    pub async fn get(&self, ctx: &RequestContext, booking_id: Uuid) -> Result<Booking, AppError> {
        let booking = self.find(booking_id).await?;
        if !booking.involves(ctx.user_id) && !ctx.is_admin() {
            return Err(AppError::forbidden("Not a participant in this booking"));
        }
        Ok(booking)
    }

    /// Applies a status transition requested by a participant.
    ///
    /// Completion couples the listing, request, and both activity
    /// counters in one transaction; cancellation releases the listing.
    pub async fn transition(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        transition: BookingTransition,
    ) -> Result<Booking, AppError> {
        let booking = self.get(ctx, booking_id).await?;
        let next = transition.status;

        if !booking.status.can_transition_to(next) {
            return Err(AppError::conflict(format!(
                "Cannot move a {} booking to {next}",
                booking.status
            )));
        }

        let updated = match next {
            BookingStatus::Completed => {
                // Only the donor confirms the handover.
                if booking.donor_id != ctx.user_id {
                    return Err(AppError::forbidden("Only the donor can complete the booking"));
                }
                let details = CompletionDetails {
                    actual_quantity: transition.actual_quantity,
                    completion_notes: transition.notes,
                };
                let change =
                    StatusChange::new(RequestStatus::Completed, Some(ctx.user_id), None);
                let completed = self
                    .booking_repo
                    .complete(booking_id, booking.status, &details, &change)
                    .await?;

                for recipient in [completed.donor_id, completed.receiver_id] {
                    self.notification_repo
                        .create(
                            &CreateNotification::new(
                                recipient,
                                NotificationKind::PickupCompleted,
                                "Pickup completed",
                                format!("Booking {} is complete", completed.reference),
                            )
                            .about_food(completed.food_id)
                            .about_request(completed.request_id),
                        )
                        .await?;
                }
                completed
            }
            BookingStatus::Cancelled => {
                let change =
                    StatusChange::new(RequestStatus::Cancelled, Some(ctx.user_id), None);
                self.booking_repo
                    .cancel(
                        booking_id,
                        booking.status,
                        ctx.user_id,
                        transition.reason.as_deref(),
                        &change,
                    )
                    .await?
            }
            BookingStatus::Scheduled | BookingStatus::InTransit | BookingStatus::NoShow => {
                if next == BookingStatus::NoShow && booking.donor_id != ctx.user_id {
                    return Err(AppError::forbidden("Only the donor can record a no-show"));
                }
                self.booking_repo
                    .transition_status(booking_id, booking.status, next)
                    .await?
            }
            BookingStatus::Confirmed | BookingStatus::Expired => {
                return Err(AppError::validation(format!(
                    "Cannot move a booking to {next} directly"
                )));
            }
        };

        info!(booking_id = %booking_id, status = %updated.status, "Booking transitioned");

        Ok(updated)
    }

    /// Records one side's feedback and folds the rating into the
    /// counterparty's accumulator.
    pub async fn give_feedback(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        feedback: BookingFeedback,
    ) -> Result<Booking, AppError> {
        feedback.validate()?;
        let booking = self.get(ctx, booking_id).await?;

        if booking.status != BookingStatus::Completed {
            return Err(AppError::conflict("Feedback requires a completed booking"));
        }

        let (updated, rated_user) = if ctx.user_id == booking.donor_id {
            let updated = self
                .booking_repo
                .set_donor_feedback(booking_id, feedback.rating, feedback.review.as_deref())
                .await?;
            (updated, booking.receiver_id)
        } else {
            let updated = self
                .booking_repo
                .set_receiver_feedback(booking_id, feedback.rating, feedback.review.as_deref())
                .await?;
            // The receiver's rating also scores the food itself.
            self.food_repo
                .apply_rating(booking.food_id, feedback.rating)
                .await?;
            (updated, booking.donor_id)
        };

        self.user_repo.apply_rating(rated_user, feedback.rating).await?;

        info!(
            booking_id = %booking_id,
            rated_user = %rated_user,
            rating = feedback.rating,
            "Feedback recorded"
        );

        Ok(updated)
    }

    async fn find(&self, booking_id: Uuid) -> Result<Booking, AppError> {
        self.booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))
    }
}
