//! Booking lifecycle state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a pickup booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created from an approved request; no pickup slot agreed yet.
    Confirmed,
    /// Pickup date and time window agreed.
    Scheduled,
    /// Receiver is on the way.
    InTransit,
    /// Food handed over.
    Completed,
    /// Called off by either party.
    Cancelled,
    /// Receiver never showed up.
    NoShow,
    /// The booking window lapsed without pickup.
    Expired,
}

impl BookingStatus {
    /// States this status may move to.
    pub fn allowed_transitions(&self) -> &'static [BookingStatus] {
        match self {
            Self::Confirmed => &[
                Self::Scheduled,
                Self::InTransit,
                Self::Cancelled,
                Self::Expired,
            ],
            Self::Scheduled => &[
                Self::InTransit,
                Self::Completed,
                Self::Cancelled,
                Self::NoShow,
                Self::Expired,
            ],
            Self::InTransit => &[Self::Completed, Self::Cancelled, Self::NoShow],
            Self::Completed | Self::Cancelled | Self::NoShow | Self::Expired => &[],
        }
    }

    /// Check whether a transition to `next` is permitted.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Check if the booking is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Scheduled => "scheduled",
            Self::InTransit => "in_transit",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "scheduled" => Ok(Self::Scheduled),
            "in_transit" => Ok(Self::InTransit),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            "expired" => Ok(Self::Expired),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid booking status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_transitions() {
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Scheduled));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::InTransit));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::NoShow));
    }

    #[test]
    fn test_in_transit_cannot_expire() {
        assert!(BookingStatus::InTransit.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::InTransit.can_transition_to(BookingStatus::Expired));
    }

    #[test]
    fn test_terminal_states_locked() {
        for status in [
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::NoShow,
            BookingStatus::Expired,
        ] {
            assert!(status.is_terminal());
            assert!(!status.can_transition_to(BookingStatus::Confirmed));
        }
    }
}
