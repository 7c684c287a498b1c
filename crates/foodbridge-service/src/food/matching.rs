//! Search query parameters and the matched-listing view model.

use serde::{Deserialize, Serialize};

use foodbridge_core::types::display::{format_distance, format_posted_ago, format_time_remaining};
use foodbridge_core::types::geo::GeoPoint;
use foodbridge_entity::food::{Food, FoodCategory};

/// Parameters of a listing search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodSearchQuery {
    /// Restrict to one category; `None` means all.
    pub category: Option<FoodCategory>,
    /// Case-insensitive substring over title and description.
    pub search: Option<String>,
    /// Caller's location, enabling radius filtering and distance sort.
    pub origin: Option<GeoPoint>,
    /// Search radius in kilometers; defaults from configuration.
    pub radius_km: Option<f64>,
}

/// A listing enriched with donor info and display strings.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedFood {
    #[serde(flatten)]
    pub food: Food,
    /// Donor's display name.
    pub donor_name: String,
    /// Donor's rating mean.
    pub donor_rating: f64,
    /// Exact distance from the search origin, when one was given.
    pub distance_km: Option<f64>,
    /// Human-readable distance, e.g. "500m" or "2.3km".
    pub distance_display: Option<String>,
    /// Human-readable time to expiry, e.g. "5 hours" or "2 days".
    pub expiry_display: String,
    /// Human-readable age of the listing, e.g. "10 minutes ago".
    pub posted_display: String,
}

impl MatchedFood {
    /// Build the view model for one listing.
    pub fn build(
        food: Food,
        donor_name: String,
        donor_rating: f64,
        origin: Option<&GeoPoint>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let distance_km = match (origin, food.location()) {
            (Some(origin), Some(location)) => Some(origin.distance_km(&location)),
            _ => None,
        };

        let expiry_display = format_time_remaining(food.expiry_date, now);
        let posted_display = format_posted_ago(food.created_at, now);

        Self {
            donor_name,
            donor_rating,
            distance_km,
            distance_display: distance_km.map(format_distance),
            expiry_display,
            posted_display,
            food,
        }
    }
}
