//! Food request repository implementation.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::request::model::{CreateFoodRequest, StatusChange};
use foodbridge_entity::request::{FoodRequest, RequestStatus};

/// Repository for food request CRUD and lifecycle operations.
#[derive(Debug, Clone)]
pub struct FoodRequestRepository {
    pool: PgPool,
}

impl FoodRequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a request by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FoodRequest>> {
        sqlx::query_as::<_, FoodRequest>("SELECT * FROM food_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find request by id", e)
            })
    }

    /// Insert a request and bump the listing's request counter in one
    /// transaction. The partial unique index on pending (food, requester)
    /// pairs surfaces duplicates as a Conflict.
    pub async fn create(&self, data: &CreateFoodRequest) -> AppResult<FoodRequest> {
        let now = Utc::now();
        let history = vec![StatusChange::new(RequestStatus::Pending, Some(data.requester_id), None)];

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let request = sqlx::query_as::<_, FoodRequest>(
            "INSERT INTO food_requests (food_id, requester_id, donor_id, quantity_requested, \
                                        message, priority, preferred_pickup_time, expires_at, \
                                        status_history) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(data.food_id)
        .bind(data.requester_id)
        .bind(data.donor_id)
        .bind(&data.quantity_requested)
        .bind(&data.message)
        .bind(data.priority)
        .bind(data.preferred_pickup_time)
        .bind(FoodRequest::expiry_for(now))
        .bind(sqlx::types::Json(&history))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("uniq_food_requests_pending") =>
            {
                AppError::conflict("You already have a pending request for this food")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create request", e),
        })?;

        sqlx::query("UPDATE foods SET total_requests = total_requests + 1 WHERE id = $1")
            .bind(data.food_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to increment request count", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit request", e)
        })?;

        Ok(request)
    }

    /// List a requester's own requests, newest first.
    pub async fn find_by_requester(
        &self,
        requester_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FoodRequest>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM food_requests WHERE requester_id = $1")
                .bind(requester_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count requests", e)
                })?;

        let requests = sqlx::query_as::<_, FoodRequest>(
            "SELECT * FROM food_requests WHERE requester_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(requester_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a donor's incoming requests, newest first.
    pub async fn find_by_donor(
        &self,
        donor_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FoodRequest>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM food_requests WHERE donor_id = $1")
                .bind(donor_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count incoming", e)
                })?;

        let requests = sqlx::query_as::<_, FoodRequest>(
            "SELECT * FROM food_requests WHERE donor_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(donor_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list incoming", e))?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Compare-and-swap status transition, appending the change to the
    /// request's status history in the same statement.
    pub async fn transition_status(
        &self,
        request_id: Uuid,
        expected: RequestStatus,
        next: RequestStatus,
        change: &StatusChange,
    ) -> AppResult<FoodRequest> {
        let completed_at = (next == RequestStatus::Completed).then(Utc::now);

        sqlx::query_as::<_, FoodRequest>(
            "UPDATE food_requests SET status = $3, \
                 status_history = status_history || $4::jsonb, \
                 completed_at = COALESCE($5, completed_at), \
                 updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(request_id)
        .bind(expected)
        .bind(next)
        .bind(sqlx::types::Json(change))
        .bind(completed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to transition request", e)
        })?
        .ok_or_else(|| {
            AppError::conflict(format!("Request {request_id} is no longer {expected}"))
        })
    }

    /// Approve a request: CAS the request to approved, record the donor's
    /// response and confirmed pickup time, and reserve the listing, all in
    /// one transaction.
    pub async fn approve(
        &self,
        request_id: Uuid,
        donor_response: Option<&str>,
        confirmed_pickup_time: Option<chrono::DateTime<Utc>>,
        change: &StatusChange,
    ) -> AppResult<FoodRequest> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let request = sqlx::query_as::<_, FoodRequest>(
            "UPDATE food_requests SET status = 'approved', \
                 donor_response = $2, \
                 confirmed_pickup_time = $3, \
                 status_history = status_history || $4::jsonb, \
                 updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(request_id)
        .bind(donor_response)
        .bind(confirmed_pickup_time)
        .bind(sqlx::types::Json(change))
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to approve request", e))?
        .ok_or_else(|| {
            AppError::conflict(format!("Request {request_id} is no longer pending"))
        })?;

        let reserved = sqlx::query(
            "UPDATE foods SET status = 'reserved', updated_at = NOW() \
             WHERE id = $1 AND status = 'available'",
        )
        .bind(request.food_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reserve food", e))?;

        if reserved.rows_affected() == 0 {
            // Rolls back the approval as well.
            return Err(AppError::conflict("Food is no longer available"));
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit approval", e)
        })?;

        Ok(request)
    }

    /// Record the donor's rejection response alongside the CAS transition.
    pub async fn reject(
        &self,
        request_id: Uuid,
        donor_response: Option<&str>,
        change: &StatusChange,
    ) -> AppResult<FoodRequest> {
        sqlx::query_as::<_, FoodRequest>(
            "UPDATE food_requests SET status = 'rejected', \
                 donor_response = $2, \
                 status_history = status_history || $3::jsonb, \
                 updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(request_id)
        .bind(donor_response)
        .bind(sqlx::types::Json(change))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reject request", e))?
        .ok_or_else(|| {
            AppError::conflict(format!("Request {request_id} is no longer pending"))
        })
    }

    /// Count requests, optionally by status.
    pub async fn count_by_status(&self, status: Option<RequestStatus>) -> AppResult<i64> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM food_requests WHERE status = $1")
                    .bind(status)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM food_requests")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count requests", e))?;
        Ok(count)
    }
}
