//! Booking entity: model, pickup scheduling, and lifecycle state machine.

pub mod model;
pub mod status;

pub use model::{Booking, BookingFeedback, CreateBooking};
pub use status::BookingStatus;
