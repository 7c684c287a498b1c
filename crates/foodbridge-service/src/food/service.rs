//! Food listing use cases: CRUD, detail views, and the matching query.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use foodbridge_core::config::MatchingConfig;
use foodbridge_core::error::AppError;
use foodbridge_core::types::geo::GeoPoint;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::food::{FoodFilter, FoodRepository};
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_entity::food::model::{CreateFood, UpdateFood};
use foodbridge_entity::food::{Food, FoodStatus};
use foodbridge_entity::user::User;

use crate::context::RequestContext;

use super::matching::{FoodSearchQuery, MatchedFood};

/// Handles listing CRUD and the matching query.
#[derive(Debug, Clone)]
pub struct FoodService {
    food_repo: Arc<FoodRepository>,
    user_repo: Arc<UserRepository>,
    matching: MatchingConfig,
}

impl FoodService {
    /// Creates a new food service.
    pub fn new(
        food_repo: Arc<FoodRepository>,
        user_repo: Arc<UserRepository>,
        matching: MatchingConfig,
    ) -> Self {
        Self {
            food_repo,
            user_repo,
            matching,
        }
    }

    /// Creates a listing for the current donor.
    pub async fn create(&self, ctx: &RequestContext, mut data: CreateFood) -> Result<Food, AppError> {
        let user = self.require_participant(ctx).await?;
        if !user.role.can_donate() {
            return Err(AppError::forbidden("Only donors can post listings"));
        }

        data.donor_id = ctx.user_id;
        validate_listing(&data)?;

        let food = self.food_repo.create(&data).await?;

        info!(food_id = %food.id, donor_id = %ctx.user_id, "Listing created");

        Ok(food)
    }

    /// The public matching query: filter, radius search, distance sort.
    ///
    /// Without an origin the SQL paginates directly, newest first. With
    /// an origin, every candidate in the bounding box gets one exact
    /// haversine evaluation, then the full in-range set is ranked by
    /// ascending distance and sliced into the requested page, so the
    /// ordering and totals hold across pages.
    pub async fn search(
        &self,
        query: &FoodSearchQuery,
        page: &PageRequest,
    ) -> Result<PageResponse<MatchedFood>, AppError> {
        let radius_km = query
            .radius_km
            .unwrap_or(self.matching.default_radius_km)
            .clamp(0.1, self.matching.max_radius_km);

        let filter = FoodFilter {
            category: query.category,
            search: query.search.clone(),
            bounds: query.origin.map(|origin| origin.bounding_box(radius_km)),
        };
        let now = Utc::now();

        if query.origin.is_some() {
            let candidates = self.food_repo.find_available_in_bounds(&filter).await?;
            let donors = self.load_donors(&candidates).await?;
            let matched = candidates
                .into_iter()
                .map(|food| {
                    let (name, rating) = donor_summary(&donors, food.donor_id);
                    MatchedFood::build(food, name, rating, query.origin.as_ref(), now)
                })
                .collect();
            Ok(rank_by_distance(matched, radius_km, page))
        } else {
            let result = self.food_repo.search_available(&filter, page).await?;
            let donors = self.load_donors(&result.items).await?;
            Ok(result.map(|food| {
                let (name, rating) = donor_summary(&donors, food.donor_id);
                MatchedFood::build(food, name, rating, None, now)
            }))
        }
    }

    /// Listing detail with donor info; bumps the view counter.
    pub async fn get_detail(
        &self,
        food_id: Uuid,
        origin: Option<GeoPoint>,
    ) -> Result<MatchedFood, AppError> {
        let food = self
            .food_repo
            .find_by_id(food_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Food {food_id} not found")))?;

        self.food_repo.increment_views(food_id).await?;

        let donor = self.user_repo.find_by_id(food.donor_id).await?;
        let (name, rating) = donor
            .as_ref()
            .map(|d| (d.display_name(), d.average_rating))
            .unwrap_or_else(|| ("Unknown donor".to_string(), 0.0));

        Ok(MatchedFood::build(
            food,
            name,
            rating,
            origin.as_ref(),
            Utc::now(),
        ))
    }

    /// The current donor's own listings.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Food>, AppError> {
        self.food_repo.find_by_donor(ctx.user_id, page).await
    }

    /// Updates the current donor's own listing.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        food_id: Uuid,
        data: UpdateFood,
    ) -> Result<Food, AppError> {
        let food = self.require_owned(ctx, food_id).await?;

        if food.status.is_terminal() {
            return Err(AppError::conflict(format!(
                "Cannot edit a {} listing",
                food.status
            )));
        }
        if let Some(expiry) = data.expiry_date {
            if expiry <= Utc::now() {
                return Err(AppError::validation("Expiry date must be in the future"));
            }
        }

        let updated = self.food_repo.update(food_id, &data).await?;

        info!(food_id = %food_id, donor_id = %ctx.user_id, "Listing updated");

        Ok(updated)
    }

    /// Cancels the current donor's own listing.
    pub async fn cancel(&self, ctx: &RequestContext, food_id: Uuid) -> Result<Food, AppError> {
        let food = self.require_owned(ctx, food_id).await?;

        if !food.status.can_transition_to(FoodStatus::Cancelled) {
            return Err(AppError::conflict(format!(
                "Cannot cancel a {} listing",
                food.status
            )));
        }

        let cancelled = self
            .food_repo
            .transition_status(food_id, food.status, FoodStatus::Cancelled)
            .await?;

        info!(food_id = %food_id, donor_id = %ctx.user_id, "Listing cancelled");

        Ok(cancelled)
    }

    async fn require_participant(&self, ctx: &RequestContext) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;
        if !user.can_participate() {
            return Err(AppError::forbidden("Account is not approved"));
        }
        Ok(user)
    }

    async fn require_owned(&self, ctx: &RequestContext, food_id: Uuid) -> Result<Food, AppError> {
        let food = self
            .food_repo
            .find_by_id(food_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Food {food_id} not found")))?;
        if food.donor_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::forbidden("You do not own this listing"));
        }
        Ok(food)
    }

    async fn load_donors(&self, foods: &[Food]) -> Result<HashMap<Uuid, User>, AppError> {
        let mut donors = HashMap::new();
        for food in foods {
            if donors.contains_key(&food.donor_id) {
                continue;
            }
            if let Some(donor) = self.user_repo.find_by_id(food.donor_id).await? {
                donors.insert(food.donor_id, donor);
            }
        }
        Ok(donors)
    }
}

fn donor_summary(donors: &HashMap<Uuid, User>, donor_id: Uuid) -> (String, f64) {
    donors
        .get(&donor_id)
        .map(|d| (d.display_name(), d.average_rating))
        .unwrap_or_else(|| ("Unknown donor".to_string(), 0.0))
}

/// Drops matches outside the radius, orders the rest by ascending
/// distance, and slices out the requested page. The page metadata
/// reflects the whole in-range set, not just this page.
fn rank_by_distance(
    mut matched: Vec<MatchedFood>,
    radius_km: f64,
    page: &PageRequest,
) -> PageResponse<MatchedFood> {
    matched.retain(|m| m.distance_km.is_none_or(|d| d <= radius_km));
    matched.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total = matched.len() as u64;
    let items: Vec<MatchedFood> = matched
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();

    PageResponse::new(items, page.page, page.page_size, total)
}

fn validate_listing(data: &CreateFood) -> Result<(), AppError> {
    if data.title.trim().is_empty() || data.title.len() > 100 {
        return Err(AppError::validation(
            "Title must be between 1 and 100 characters",
        ));
    }
    if data.description.trim().is_empty() || data.description.len() > 1000 {
        return Err(AppError::validation(
            "Description must be between 1 and 1000 characters",
        ));
    }
    if let Some(instructions) = &data.pickup_instructions {
        if instructions.len() > 300 {
            return Err(AppError::validation(
                "Pickup instructions must be at most 300 characters",
            ));
        }
    }
    if GeoPoint::new(data.latitude, data.longitude).is_none() {
        return Err(AppError::validation("Invalid pickup coordinates"));
    }
    let now = Utc::now();
    if data.expiry_date <= now {
        return Err(AppError::validation("Expiry date must be in the future"));
    }
    if data.available_until <= data.available_from {
        return Err(AppError::validation(
            "Pickup window must end after it starts",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodbridge_entity::food::model::DietaryInfo;
    use foodbridge_entity::food::FoodCategory;

    fn sample_create() -> CreateFood {
        let now = Utc::now();
        CreateFood {
            donor_id: Uuid::new_v4(),
            title: "Surplus bread".to_string(),
            description: "20 loaves from today's bake".to_string(),
            category: FoodCategory::Bakery,
            quantity: "20 loaves".to_string(),
            address: "1 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            zip_code: "560001".to_string(),
            latitude: 12.9716,
            longitude: 77.5946,
            expiry_date: now + chrono::Duration::hours(12),
            available_from: now,
            available_until: now + chrono::Duration::hours(6),
            pickup_instructions: None,
            dietary_info: DietaryInfo::default(),
            image_urls: vec![],
        }
    }

    #[test]
    fn test_validate_accepts_sane_listing() {
        assert!(validate_listing(&sample_create()).is_ok());
    }

    #[test]
    fn test_validate_rejects_past_expiry() {
        let mut data = sample_create();
        data.expiry_date = Utc::now() - chrono::Duration::hours(1);
        assert!(validate_listing(&data).is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let mut data = sample_create();
        data.available_until = data.available_from - chrono::Duration::hours(1);
        assert!(validate_listing(&data).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_coordinates() {
        let mut data = sample_create();
        data.latitude = 123.0;
        assert!(validate_listing(&data).is_err());
    }

    fn sample_food() -> Food {
        let now = Utc::now();
        Food {
            id: Uuid::new_v4(),
            donor_id: Uuid::new_v4(),
            title: "Surplus bread".to_string(),
            description: "20 loaves from today's bake".to_string(),
            category: FoodCategory::Bakery,
            quantity: "20 loaves".to_string(),
            address: "1 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            zip_code: "560001".to_string(),
            latitude: 12.9716,
            longitude: 77.5946,
            expiry_date: now + chrono::Duration::hours(12),
            available_from: now,
            available_until: now + chrono::Duration::hours(6),
            pickup_instructions: None,
            dietary_info: sqlx::types::Json(DietaryInfo::default()),
            image_urls: vec![],
            status: FoodStatus::Available,
            total_requests: 0,
            total_views: 0,
            average_rating: 0.0,
            total_ratings: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn matched_at(distance_km: f64) -> MatchedFood {
        MatchedFood {
            food: sample_food(),
            donor_name: "Daily Bread".to_string(),
            donor_rating: 4.5,
            distance_km: Some(distance_km),
            distance_display: None,
            expiry_display: String::new(),
            posted_display: String::new(),
        }
    }

    #[test]
    fn test_rank_orders_by_distance_across_pages() {
        let matched = vec![
            matched_at(5.0),
            matched_at(1.0),
            matched_at(4.0),
            matched_at(2.0),
            matched_at(3.0),
        ];
        let page = PageRequest::new(2, 2);

        let result = rank_by_distance(matched, 10.0, &page);

        let distances: Vec<f64> = result.items.iter().filter_map(|m| m.distance_km).collect();
        assert_eq!(distances, vec![3.0, 4.0]);
        assert_eq!(result.total_items, 5);
        assert_eq!(result.total_pages, 3);
        assert!(result.has_next);
        assert!(result.has_previous);
    }

    #[test]
    fn test_rank_total_counts_whole_radius_not_the_page() {
        let matched = vec![
            matched_at(1.0),
            matched_at(2.0),
            matched_at(3.0),
            matched_at(12.0),
        ];
        let page = PageRequest::new(1, 2);

        let result = rank_by_distance(matched, 10.0, &page);

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total_items, 3);
        assert!(result.has_next);
    }

    #[test]
    fn test_rank_page_past_the_end_is_empty_with_real_total() {
        let matched = vec![matched_at(1.0), matched_at(2.0), matched_at(3.0)];
        let page = PageRequest::new(5, 2);

        let result = rank_by_distance(matched, 10.0, &page);

        assert!(result.items.is_empty());
        assert_eq!(result.total_items, 3);
        assert!(!result.has_next);
    }
}
