//! Food listing repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::geo::GeoBounds;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::food::model::{CreateFood, UpdateFood};
use foodbridge_entity::food::{Food, FoodCategory, FoodStatus};

/// Filter parameters for the listing search query.
#[derive(Debug, Clone, Default)]
pub struct FoodFilter {
    /// Restrict to one category.
    pub category: Option<FoodCategory>,
    /// Case-insensitive substring over title and description.
    pub search: Option<String>,
    /// Bounding-box prefilter for radius search.
    pub bounds: Option<GeoBounds>,
}

/// Repository for food listing CRUD and search operations.
#[derive(Debug, Clone)]
pub struct FoodRepository {
    pool: PgPool,
}

impl FoodRepository {
    /// Create a new food repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a listing by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Food>> {
        sqlx::query_as::<_, Food>("SELECT * FROM foods WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find food by id", e))
    }

    /// All available listings inside the filter's bounding box, unpaged.
    ///
    /// The box overshoots the search circle, so the caller still applies
    /// the exact distance check before ranking and paginating.
    pub async fn find_available_in_bounds(&self, filter: &FoodFilter) -> AppResult<Vec<Food>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM foods WHERE status = 'available'");
        push_filter(&mut query, filter);
        query.push(" ORDER BY created_at DESC");

        query
            .build_query_as::<Food>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load geo candidates", e)
            })
    }

    /// Search available listings, paginated in SQL, newest first.
    pub async fn search_available(
        &self,
        filter: &FoodFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Food>> {
        let mut count_query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM foods WHERE status = 'available'");
        push_filter(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count food search", e)
            })?;

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM foods WHERE status = 'available'");
        push_filter(&mut query, filter);
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(page.limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(page.offset() as i64);

        let foods = query
            .build_query_as::<Food>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search foods", e))?;

        Ok(PageResponse::new(
            foods,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a donor's own listings, newest first.
    pub async fn find_by_donor(
        &self,
        donor_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Food>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM foods WHERE donor_id = $1")
            .bind(donor_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count donor foods", e)
            })?;

        let foods = sqlx::query_as::<_, Food>(
            "SELECT * FROM foods WHERE donor_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(donor_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list donor foods", e))?;

        Ok(PageResponse::new(
            foods,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new listing.
    pub async fn create(&self, data: &CreateFood) -> AppResult<Food> {
        sqlx::query_as::<_, Food>(
            "INSERT INTO foods (donor_id, title, description, category, quantity, address, \
                                city, state, zip_code, latitude, longitude, expiry_date, \
                                available_from, available_until, pickup_instructions, \
                                dietary_info, image_urls) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING *",
        )
        .bind(data.donor_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category)
        .bind(&data.quantity)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.zip_code)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(data.expiry_date)
        .bind(data.available_from)
        .bind(data.available_until)
        .bind(&data.pickup_instructions)
        .bind(sqlx::types::Json(&data.dietary_info))
        .bind(&data.image_urls)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create food", e))
    }

    /// Update a listing's editable fields.
    pub async fn update(&self, food_id: Uuid, data: &UpdateFood) -> AppResult<Food> {
        sqlx::query_as::<_, Food>(
            "UPDATE foods SET title = COALESCE($2, title), \
                              description = COALESCE($3, description), \
                              category = COALESCE($4, category), \
                              quantity = COALESCE($5, quantity), \
                              pickup_instructions = COALESCE($6, pickup_instructions), \
                              expiry_date = COALESCE($7, expiry_date), \
                              available_until = COALESCE($8, available_until), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(food_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category)
        .bind(&data.quantity)
        .bind(&data.pickup_instructions)
        .bind(data.expiry_date)
        .bind(data.available_until)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update food", e))?
        .ok_or_else(|| AppError::not_found(format!("Food {food_id} not found")))
    }

    /// Compare-and-swap status transition. Zero rows affected means a
    /// concurrent transition won.
    pub async fn transition_status(
        &self,
        food_id: Uuid,
        expected: FoodStatus,
        next: FoodStatus,
    ) -> AppResult<Food> {
        sqlx::query_as::<_, Food>(
            "UPDATE foods SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(food_id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to transition food status", e)
        })?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Food {food_id} is no longer {expected}"
            ))
        })
    }

    /// Atomically bump the view counter.
    pub async fn increment_views(&self, food_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE foods SET total_views = total_views + 1 WHERE id = $1")
            .bind(food_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to increment views", e)
            })?;
        Ok(())
    }

    /// Fold one rating into the listing's accumulator as a single atomic
    /// update; same arithmetic as `foodbridge_entity::rating::fold_rating`.
    pub async fn apply_rating(&self, food_id: Uuid, rating: i16) -> AppResult<Food> {
        sqlx::query_as::<_, Food>(
            "UPDATE foods SET \
                 average_rating = (average_rating * total_ratings + $2) / (total_ratings + 1), \
                 total_ratings = total_ratings + 1, \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(food_id)
        .bind(rating as f64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to apply food rating", e))?
        .ok_or_else(|| AppError::not_found(format!("Food {food_id} not found")))
    }

    /// Count listings, optionally by status.
    pub async fn count_by_status(&self, status: Option<FoodStatus>) -> AppResult<i64> {
        let count: i64 = match status {
            Some(status) => sqlx::query_scalar("SELECT COUNT(*) FROM foods WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await,
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM foods")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count foods", e))?;
        Ok(count)
    }

    /// Count listings posted since the given time.
    pub async fn count_created_since(&self, since: DateTime<Utc>) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM foods WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count posted foods", e)
            })
    }

    /// Listing counts grouped by category.
    pub async fn count_by_category(&self) -> AppResult<Vec<(FoodCategory, i64)>> {
        sqlx::query_as::<_, (FoodCategory, i64)>(
            "SELECT category, COUNT(*) FROM foods GROUP BY category",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count foods by category", e)
        })
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &FoodFilter) {
    if let Some(category) = filter.category {
        query.push(" AND category = ");
        query.push_bind(category);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query.push(" AND (title ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR description ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
    if let Some(bounds) = &filter.bounds {
        query.push(" AND latitude BETWEEN ");
        query.push_bind(bounds.min_lat);
        query.push(" AND ");
        query.push_bind(bounds.max_lat);
        query.push(" AND longitude BETWEEN ");
        query.push_bind(bounds.min_lng);
        query.push(" AND ");
        query.push_bind(bounds.max_lng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built_sql(filter: &FoodFilter) -> String {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM foods WHERE status = 'available'");
        push_filter(&mut query, filter);
        query.sql().to_string()
    }

    #[test]
    fn test_search_always_restricted_to_available() {
        let sql = built_sql(&FoodFilter::default());
        assert!(sql.contains("status = 'available'"));
        assert!(!sql.contains("OR"));
    }

    #[test]
    fn test_filters_extend_but_never_replace_status_clause() {
        let bounds = GeoBounds {
            min_lat: 12.0,
            max_lat: 13.0,
            min_lng: 77.0,
            max_lng: 78.0,
        };
        let filter = FoodFilter {
            category: Some(FoodCategory::Bakery),
            search: Some("bread".to_string()),
            bounds: Some(bounds),
        };
        let sql = built_sql(&filter);
        assert!(sql.starts_with("SELECT * FROM foods WHERE status = 'available'"));
        assert!(sql.contains(" AND category = "));
        assert!(sql.contains("title ILIKE"));
        assert!(sql.contains("description ILIKE"));
        assert!(sql.contains(" AND latitude BETWEEN "));
        assert!(sql.contains(" AND longitude BETWEEN "));
    }
}
