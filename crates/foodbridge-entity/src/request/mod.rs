//! Food request entity: model, priority, and lifecycle state machine.

pub mod model;
pub mod status;

pub use model::{CreateFoodRequest, FoodRequest, StatusChange};
pub use status::{RequestPriority, RequestStatus};
