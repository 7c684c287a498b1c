//! Booking entity model.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// Hours a booking stays open before it expires without pickup.
pub const BOOKING_TTL_HOURS: i64 = 48;

/// A confirmed pickup arrangement between a donor and a receiver.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// Human-readable reference, e.g. "BK1756540800ABCD".
    pub reference: String,
    /// The approved request this booking fulfils.
    pub request_id: Uuid,
    /// The listing being picked up.
    pub food_id: Uuid,
    /// The donor handing over the food.
    pub donor_id: Uuid,
    /// The receiver picking it up.
    pub receiver_id: Uuid,
    /// Confirmed quantity value, e.g. 5.0.
    pub quantity_value: f64,
    /// Confirmed quantity unit, e.g. "kg" or "servings".
    pub quantity_unit: String,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Agreed pickup date.
    pub scheduled_pickup_date: Option<DateTime<Utc>>,
    /// Start of the agreed time slot, e.g. "14:00".
    pub pickup_window_start: Option<String>,
    /// End of the agreed time slot, e.g. "16:00".
    pub pickup_window_end: Option<String>,
    /// Notes for the pickup, e.g. gate codes.
    pub special_instructions: Option<String>,
    /// When the food was actually handed over.
    pub picked_up_at: Option<DateTime<Utc>>,
    /// Quantity actually handed over, if it differed.
    pub actual_quantity: Option<String>,
    /// Notes recorded at completion.
    pub completion_notes: Option<String>,
    /// Who cancelled, if cancelled.
    pub cancelled_by: Option<Uuid>,
    /// Why the booking was cancelled.
    pub cancellation_reason: Option<String>,
    /// When the booking was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Donor's rating of the receiver (1..=5).
    pub donor_rating: Option<i16>,
    /// Donor's review text.
    pub donor_review: Option<String>,
    /// Receiver's rating of the donor (1..=5).
    pub receiver_rating: Option<i16>,
    /// Receiver's review text.
    pub receiver_review: Option<String>,
    /// When the booking lapses without pickup.
    pub expires_at: DateTime<Utc>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Expiry deadline for a booking created at `created_at`.
    pub fn expiry_for(created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::hours(BOOKING_TTL_HOURS)
    }

    /// Generate a booking reference: "BK" + unix seconds + 4 random
    /// uppercase alphanumerics.
    pub fn generate_reference(now: DateTime<Utc>) -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let mut rng = rand::thread_rng();
        let suffix: String = (0..4)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect();
        format!("BK{}{}", now.timestamp(), suffix)
    }

    /// Whether `user_id` is the donor or the receiver on this booking.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.donor_id == user_id || self.receiver_id == user_id
    }
}

/// One side's feedback on a completed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingFeedback {
    /// Rating of the counterparty, 1..=5.
    pub rating: i16,
    pub review: Option<String>,
}

impl BookingFeedback {
    /// Validate the rating range.
    pub fn validate(&self) -> foodbridge_core::AppResult<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(foodbridge_core::AppError::validation(
                "Rating must be between 1 and 5",
            ));
        }
        Ok(())
    }
}

/// Data required to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    pub request_id: Uuid,
    pub quantity_value: f64,
    pub quantity_unit: String,
    pub scheduled_pickup_date: Option<DateTime<Utc>>,
    pub pickup_window_start: Option<String>,
    pub pickup_window_end: Option<String>,
    pub special_instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        let now = Utc::now();
        let reference = Booking::generate_reference(now);
        assert!(reference.starts_with("BK"));
        assert_eq!(reference.len(), 2 + now.timestamp().to_string().len() + 4);
        let suffix = &reference[reference.len() - 4..];
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_expiry_is_48_hours_out() {
        let created = Utc::now();
        assert_eq!(Booking::expiry_for(created), created + Duration::hours(48));
    }

    #[test]
    fn test_feedback_rating_bounds() {
        assert!(BookingFeedback { rating: 1, review: None }.validate().is_ok());
        assert!(BookingFeedback { rating: 5, review: None }.validate().is_ok());
        assert!(BookingFeedback { rating: 0, review: None }.validate().is_err());
        assert!(BookingFeedback { rating: 6, review: None }.validate().is_err());
    }
}
