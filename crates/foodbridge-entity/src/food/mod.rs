//! Food listing entity: model, category, and availability state machine.

pub mod category;
pub mod model;
pub mod status;

pub use category::FoodCategory;
pub use model::{CreateFood, DietaryInfo, Food, UpdateFood};
pub use status::FoodStatus;
