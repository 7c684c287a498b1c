//! Booking repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::booking::model::CreateBooking;
use foodbridge_entity::booking::{Booking, BookingStatus};
use foodbridge_entity::request::model::StatusChange;
use foodbridge_entity::request::RequestStatus;

/// Details recorded when a booking completes.
#[derive(Debug, Clone, Default)]
pub struct CompletionDetails {
    pub actual_quantity: Option<String>,
    pub completion_notes: Option<String>,
}

/// Repository for booking CRUD and lifecycle operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking by id", e)
            })
    }

    /// Insert a booking against an approved request. The unique index on
    /// request_id surfaces a second booking attempt as a Conflict.
    pub async fn create(
        &self,
        data: &CreateBooking,
        food_id: Uuid,
        donor_id: Uuid,
        receiver_id: Uuid,
    ) -> AppResult<Booking> {
        let now = Utc::now();
        let status = if data.scheduled_pickup_date.is_some() {
            BookingStatus::Scheduled
        } else {
            BookingStatus::Confirmed
        };

        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (reference, request_id, food_id, donor_id, receiver_id, \
                                   quantity_value, quantity_unit, status, \
                                   scheduled_pickup_date, pickup_window_start, \
                                   pickup_window_end, special_instructions, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING *",
        )
        .bind(Booking::generate_reference(now))
        .bind(data.request_id)
        .bind(food_id)
        .bind(donor_id)
        .bind(receiver_id)
        .bind(data.quantity_value)
        .bind(&data.quantity_unit)
        .bind(status)
        .bind(data.scheduled_pickup_date)
        .bind(&data.pickup_window_start)
        .bind(&data.pickup_window_end)
        .bind(&data.special_instructions)
        .bind(Booking::expiry_for(now))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("bookings_request_id_key") =>
            {
                AppError::conflict("A booking already exists for this request")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create booking", e),
        })
    }

    /// List bookings where the user is donor or receiver, newest first.
    pub async fn find_by_participant(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE donor_id = $1 OR receiver_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE donor_id = $1 OR receiver_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Compare-and-swap status transition with no side effects, used for
    /// the scheduled and in-transit steps.
    pub async fn transition_status(
        &self,
        booking_id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(booking_id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to transition booking", e)
        })?
        .ok_or_else(|| {
            AppError::conflict(format!("Booking {booking_id} is no longer {expected}"))
        })
    }

    /// Complete a booking with all coupled side effects in one
    /// transaction: the listing is marked picked up, the request is
    /// completed, and both parties' activity counters are bumped.
    pub async fn complete(
        &self,
        booking_id: Uuid,
        expected: BookingStatus,
        details: &CompletionDetails,
        request_change: &StatusChange,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'completed', picked_up_at = NOW(), \
                 actual_quantity = $3, completion_notes = $4, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(booking_id)
        .bind(expected)
        .bind(&details.actual_quantity)
        .bind(&details.completion_notes)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete booking", e))?
        .ok_or_else(|| {
            AppError::conflict(format!("Booking {booking_id} is no longer {expected}"))
        })?;

        sqlx::query(
            "UPDATE foods SET status = 'picked_up', updated_at = NOW() \
             WHERE id = $1 AND status = 'reserved'",
        )
        .bind(booking.food_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark picked up", e))?;

        sqlx::query(
            "UPDATE food_requests SET status = 'completed', completed_at = NOW(), \
                 status_history = status_history || $2::jsonb, updated_at = NOW() \
             WHERE id = $1 AND status = $3",
        )
        .bind(booking.request_id)
        .bind(sqlx::types::Json(request_change))
        .bind(RequestStatus::Approved)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete request", e))?;

        sqlx::query(
            "UPDATE users SET total_donations = total_donations + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(booking.donor_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump donor counter", e)
        })?;

        sqlx::query(
            "UPDATE users SET total_received = total_received + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(booking.receiver_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump receiver counter", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit completion", e)
        })?;

        Ok(booking)
    }

    /// Cancel a booking, releasing the listing back to available and
    /// cancelling the underlying request in the same transaction.
    pub async fn cancel(
        &self,
        booking_id: Uuid,
        expected: BookingStatus,
        cancelled_by: Uuid,
        reason: Option<&str>,
        request_change: &StatusChange,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled', cancelled_by = $3, \
                 cancellation_reason = $4, cancelled_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(booking_id)
        .bind(expected)
        .bind(cancelled_by)
        .bind(reason)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel booking", e))?
        .ok_or_else(|| {
            AppError::conflict(format!("Booking {booking_id} is no longer {expected}"))
        })?;

        sqlx::query(
            "UPDATE foods SET status = 'available', updated_at = NOW() \
             WHERE id = $1 AND status = 'reserved'",
        )
        .bind(booking.food_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release food", e))?;

        sqlx::query(
            "UPDATE food_requests SET status = 'cancelled', \
                 status_history = status_history || $2::jsonb, updated_at = NOW() \
             WHERE id = $1 AND status = 'approved'",
        )
        .bind(booking.request_id)
        .bind(sqlx::types::Json(request_change))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel request", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit cancellation", e)
        })?;

        Ok(booking)
    }

    /// Record the donor's feedback. Fails if already given.
    pub async fn set_donor_feedback(
        &self,
        booking_id: Uuid,
        rating: i16,
        review: Option<&str>,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET donor_rating = $2, donor_review = $3, updated_at = NOW() \
             WHERE id = $1 AND status = 'completed' AND donor_rating IS NULL RETURNING *",
        )
        .bind(booking_id)
        .bind(rating)
        .bind(review)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record donor feedback", e)
        })?
        .ok_or_else(|| {
            AppError::conflict("Feedback already given or booking not completed")
        })
    }

    /// Record the receiver's feedback. Fails if already given.
    pub async fn set_receiver_feedback(
        &self,
        booking_id: Uuid,
        rating: i16,
        review: Option<&str>,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET receiver_rating = $2, receiver_review = $3, updated_at = NOW() \
             WHERE id = $1 AND status = 'completed' AND receiver_rating IS NULL RETURNING *",
        )
        .bind(booking_id)
        .bind(rating)
        .bind(review)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record receiver feedback", e)
        })?
        .ok_or_else(|| {
            AppError::conflict("Feedback already given or booking not completed")
        })
    }

    /// Count bookings, optionally by status.
    pub async fn count_by_status(&self, status: Option<BookingStatus>) -> AppResult<i64> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE status = $1")
                    .bind(status)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;
        Ok(count)
    }
}
