//! Food listing management and geo-matching.

pub mod matching;
pub mod service;

pub use matching::{FoodSearchQuery, MatchedFood};
pub use service::FoodService;
