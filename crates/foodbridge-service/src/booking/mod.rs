//! Booking lifecycle and pickup feedback.

pub mod service;

pub use service::{BookingService, BookingTransition};
