//! Food category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a food listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "food_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Vegetables,
    Bakery,
    Cooked,
    Canned,
    Dairy,
    Grains,
    Other,
}

impl FoodCategory {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetables => "vegetables",
            Self::Bakery => "bakery",
            Self::Cooked => "cooked",
            Self::Canned => "canned",
            Self::Dairy => "dairy",
            Self::Grains => "grains",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vegetables" => Ok(Self::Vegetables),
            "bakery" => Ok(Self::Bakery),
            "cooked" => Ok(Self::Cooked),
            "canned" => Ok(Self::Canned),
            "dairy" => Ok(Self::Dairy),
            "grains" => Ok(Self::Grains),
            "other" => Ok(Self::Other),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid food category: '{s}'"
            ))),
        }
    }
}
