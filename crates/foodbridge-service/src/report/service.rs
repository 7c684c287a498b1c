//! Moderation report use cases.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::report::ReportRepository;
use foodbridge_entity::report::{CreateReport, Report, ReportStatus, ResolutionAction};

use crate::context::RequestContext;

/// An admin's resolution of a report.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ReportResolution {
    pub status: ReportStatus,
    pub action: Option<ResolutionAction>,
    pub notes: Option<String>,
}

/// Handles filing and resolving moderation reports.
#[derive(Debug, Clone)]
pub struct ReportService {
    report_repo: Arc<ReportRepository>,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(report_repo: Arc<ReportRepository>) -> Self {
        Self { report_repo }
    }

    /// Files a report on behalf of the current user.
    pub async fn create(&self, ctx: &RequestContext, mut data: CreateReport) -> Result<Report, AppError> {
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

        data.reporter_id = ctx.user_id;
        let report = self.report_repo.create(&data).await?;

        info!(report_id = %report.id, reporter_id = %ctx.user_id, "Report filed");

        Ok(report)
    }

    /// Lists reports for moderation. Admin only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<ReportStatus>,
        page: &PageRequest,
    ) -> Result<PageResponse<Report>, AppError> {
        self.require_admin(ctx)?;
        self.report_repo.find_all(status, page).await
    }

    /// Moves a report through the moderation workflow. Admin only.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        report_id: Uuid,
        resolution: ReportResolution,
    ) -> Result<Report, AppError> {
        self.require_admin(ctx)?;

        let report = self
            .report_repo
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Report {report_id} not found")))?;

        let next = resolution.status;
        if !report.status.can_transition_to(next) {
            return Err(AppError::conflict(format!(
                "Cannot move a {} report to {next}",
                report.status
            )));
        }

        let updated = match next {
            ReportStatus::Resolved | ReportStatus::Dismissed => {
                let action = resolution
                    .action
                    .ok_or_else(|| AppError::validation("Resolution action is required"))?;
                self.report_repo
                    .resolve(
                        report_id,
                        report.status,
                        next,
                        action,
                        resolution.notes.as_deref(),
                        ctx.user_id,
                    )
                    .await?
            }
            _ => {
                self.report_repo
                    .transition_status(report_id, report.status, next, ctx.user_id)
                    .await?
            }
        };

        info!(report_id = %report_id, status = %updated.status, "Report updated");

        Ok(updated)
    }

    fn require_admin(&self, ctx: &RequestContext) -> Result<(), AppError> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden("Admin access required"));
        }
        Ok(())
    }
}
