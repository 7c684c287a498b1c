//! Moderation report repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::report::{CreateReport, Report, ReportStatus, ResolutionAction};

/// Repository for moderation report operations.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Create a new report repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a report by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Report>> {
        sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find report by id", e)
            })
    }

    /// File a new report.
    pub async fn create(&self, data: &CreateReport) -> AppResult<Report> {
        sqlx::query_as::<_, Report>(
            "INSERT INTO reports (reporter_id, report_type, target_type, target_id, title, \
                                  description, severity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(data.reporter_id)
        .bind(data.report_type)
        .bind(data.target_type)
        .bind(data.target_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.severity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create report", e))
    }

    /// List reports, optionally filtered by status, newest first.
    pub async fn find_all(
        &self,
        status: Option<ReportStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Report>> {
        let (total, reports) = match status {
            Some(status) => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE status = $1")
                        .bind(status)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| {
                            AppError::with_source(ErrorKind::Database, "Failed to count reports", e)
                        })?;
                let reports = sqlx::query_as::<_, Report>(
                    "SELECT * FROM reports WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(status)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list reports", e)
                })?;
                (total, reports)
            }
            None => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to count reports", e)
                    })?;
                let reports = sqlx::query_as::<_, Report>(
                    "SELECT * FROM reports ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list reports", e)
                })?;
                (total, reports)
            }
        };

        Ok(PageResponse::new(
            reports,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Compare-and-swap workflow transition, assigning the handling admin.
    pub async fn transition_status(
        &self,
        report_id: Uuid,
        expected: ReportStatus,
        next: ReportStatus,
        admin_id: Uuid,
    ) -> AppResult<Report> {
        sqlx::query_as::<_, Report>(
            "UPDATE reports SET status = $3, assigned_to = $4, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(report_id)
        .bind(expected)
        .bind(next)
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to transition report", e))?
        .ok_or_else(|| {
            AppError::conflict(format!("Report {report_id} is no longer {expected}"))
        })
    }

    /// Resolve or dismiss a report with its resolution details.
    pub async fn resolve(
        &self,
        report_id: Uuid,
        expected: ReportStatus,
        next: ReportStatus,
        action: ResolutionAction,
        notes: Option<&str>,
        admin_id: Uuid,
    ) -> AppResult<Report> {
        sqlx::query_as::<_, Report>(
            "UPDATE reports SET status = $3, resolution_action = $4, resolution_notes = $5, \
                 resolved_by = $6, resolved_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(report_id)
        .bind(expected)
        .bind(next)
        .bind(action)
        .bind(notes)
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve report", e))?
        .ok_or_else(|| {
            AppError::conflict(format!("Report {report_id} is no longer {expected}"))
        })
    }

    /// Count open reports.
    pub async fn count_open(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE status = 'open'")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count open reports", e)
            })
    }
}
