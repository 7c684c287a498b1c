//! Analytics snapshot repository implementation.

use sqlx::PgPool;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::analytics::{AnalyticsSnapshot, CreateSnapshot};

/// Repository for persisted analytics snapshots.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    /// Create a new analytics repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a snapshot. Re-running for the same date and period
    /// overwrites the previous values.
    pub async fn upsert(&self, data: &CreateSnapshot) -> AppResult<AnalyticsSnapshot> {
        sqlx::query_as::<_, AnalyticsSnapshot>(
            "INSERT INTO analytics_snapshots (snapshot_date, period, foods_posted, \
                 foods_donated, foods_expired, foods_by_category, total_users, new_users, \
                 active_users, total_donors, total_receivers, pending_approvals, \
                 total_requests, approved_requests, rejected_requests, completed_requests) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             ON CONFLICT (snapshot_date, period) DO UPDATE SET \
                 foods_posted = EXCLUDED.foods_posted, \
                 foods_donated = EXCLUDED.foods_donated, \
                 foods_expired = EXCLUDED.foods_expired, \
                 foods_by_category = EXCLUDED.foods_by_category, \
                 total_users = EXCLUDED.total_users, \
                 new_users = EXCLUDED.new_users, \
                 active_users = EXCLUDED.active_users, \
                 total_donors = EXCLUDED.total_donors, \
                 total_receivers = EXCLUDED.total_receivers, \
                 pending_approvals = EXCLUDED.pending_approvals, \
                 total_requests = EXCLUDED.total_requests, \
                 approved_requests = EXCLUDED.approved_requests, \
                 rejected_requests = EXCLUDED.rejected_requests, \
                 completed_requests = EXCLUDED.completed_requests \
             RETURNING *",
        )
        .bind(data.snapshot_date)
        .bind(data.period)
        .bind(data.foods_posted)
        .bind(data.foods_donated)
        .bind(data.foods_expired)
        .bind(sqlx::types::Json(&data.foods_by_category))
        .bind(data.total_users)
        .bind(data.new_users)
        .bind(data.active_users)
        .bind(data.total_donors)
        .bind(data.total_receivers)
        .bind(data.pending_approvals)
        .bind(data.total_requests)
        .bind(data.approved_requests)
        .bind(data.rejected_requests)
        .bind(data.completed_requests)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert snapshot", e))
    }

    /// List stored snapshots, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<AnalyticsSnapshot>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM analytics_snapshots")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count snapshots", e)
            })?;

        let snapshots = sqlx::query_as::<_, AnalyticsSnapshot>(
            "SELECT * FROM analytics_snapshots \
             ORDER BY snapshot_date DESC, created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list snapshots", e))?;

        Ok(PageResponse::new(
            snapshots,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
