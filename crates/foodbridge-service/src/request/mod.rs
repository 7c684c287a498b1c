//! Food request lifecycle.

pub mod service;

pub use service::{FoodRequestService, RequestDecision};
