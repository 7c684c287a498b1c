//! Food listing availability state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability state of a food listing.
///
/// Only `Available` listings appear in matching results and accept new
/// requests. Transitions outside the table below are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "food_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FoodStatus {
    /// Open for requests.
    Available,
    /// A booking holds this listing.
    Reserved,
    /// Handed over to a receiver.
    PickedUp,
    /// Expiry date passed before pickup.
    Expired,
    /// Withdrawn by the donor.
    Cancelled,
}

impl FoodStatus {
    /// States this status may move to.
    pub fn allowed_transitions(&self) -> &'static [FoodStatus] {
        match self {
            Self::Available => &[Self::Reserved, Self::Expired, Self::Cancelled],
            Self::Reserved => &[
                Self::PickedUp,
                Self::Available,
                Self::Expired,
                Self::Cancelled,
            ],
            Self::PickedUp | Self::Expired | Self::Cancelled => &[],
        }
    }

    /// Check whether a transition to `next` is permitted.
    pub fn can_transition_to(&self, next: FoodStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Check if the listing is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::PickedUp => "picked_up",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FoodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_transitions() {
        assert!(FoodStatus::Available.can_transition_to(FoodStatus::Reserved));
        assert!(FoodStatus::Available.can_transition_to(FoodStatus::Cancelled));
        assert!(!FoodStatus::Available.can_transition_to(FoodStatus::PickedUp));
    }

    #[test]
    fn test_reserved_can_release() {
        assert!(FoodStatus::Reserved.can_transition_to(FoodStatus::Available));
        assert!(FoodStatus::Reserved.can_transition_to(FoodStatus::PickedUp));
    }

    #[test]
    fn test_terminal_states_locked() {
        for status in [
            FoodStatus::PickedUp,
            FoodStatus::Expired,
            FoodStatus::Cancelled,
        ] {
            assert!(status.is_terminal());
            assert!(!status.can_transition_to(FoodStatus::Available));
        }
    }
}
