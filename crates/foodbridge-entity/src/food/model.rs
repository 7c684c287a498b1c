//! Food listing entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use foodbridge_core::types::geo::GeoPoint;

use super::category::FoodCategory;
use super::status::FoodStatus;

/// A donor-owned surplus food listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Food {
    /// Unique listing identifier.
    pub id: Uuid,
    /// The donor who posted this listing.
    pub donor_id: Uuid,
    /// Short title (at most 100 characters).
    pub title: String,
    /// Longer description (at most 1000 characters).
    pub description: String,
    /// Food category.
    pub category: FoodCategory,
    /// Free-text quantity, e.g. "10kg" or "5 servings".
    pub quantity: String,
    /// Pickup street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Pickup location latitude.
    pub latitude: f64,
    /// Pickup location longitude.
    pub longitude: f64,
    /// When the food expires.
    pub expiry_date: DateTime<Utc>,
    /// Start of the pickup window.
    pub available_from: DateTime<Utc>,
    /// End of the pickup window.
    pub available_until: DateTime<Utc>,
    /// Pickup instructions (at most 300 characters).
    pub pickup_instructions: Option<String>,
    /// Dietary flags and allergens.
    pub dietary_info: Json<DietaryInfo>,
    /// Image URLs.
    pub image_urls: Vec<String>,
    /// Availability state.
    pub status: FoodStatus,
    /// Number of requests ever made against this listing.
    pub total_requests: i64,
    /// Number of detail views.
    pub total_views: i64,
    /// Incrementally maintained rating mean for this listing.
    pub average_rating: f64,
    /// Number of ratings folded into `average_rating`.
    pub total_ratings: i64,
    /// When the listing was posted.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Food {
    /// The pickup location as a geo point.
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Whether this listing accepts new requests.
    pub fn is_available(&self) -> bool {
        self.status == FoodStatus::Available
    }

    /// Whether the expiry date has passed.
    pub fn is_past_expiry(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date <= now
    }
}

/// Dietary flags and allergen list, stored as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietaryInfo {
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_halal: bool,
    #[serde(default)]
    pub is_kosher: bool,
    /// e.g. ["nuts", "dairy", "gluten"]
    #[serde(default)]
    pub allergens: Vec<String>,
}

/// Data required to create a new listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFood {
    pub donor_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: FoodCategory,
    pub quantity: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub expiry_date: DateTime<Utc>,
    pub available_from: DateTime<Utc>,
    pub available_until: DateTime<Utc>,
    pub pickup_instructions: Option<String>,
    pub dietary_info: DietaryInfo,
    pub image_urls: Vec<String>,
}

/// Data for updating an existing listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFood {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<FoodCategory>,
    pub quantity: Option<String>,
    pub pickup_instructions: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
}
