//! Analytics use cases.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::repositories::analytics::AnalyticsRepository;
use foodbridge_database::repositories::booking::BookingRepository;
use foodbridge_database::repositories::food::FoodRepository;
use foodbridge_database::repositories::report::ReportRepository;
use foodbridge_database::repositories::request::FoodRequestRepository;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_entity::analytics::{
    AnalyticsPeriod, AnalyticsSnapshot, CreateSnapshot, PlatformSummary,
};
use foodbridge_entity::booking::BookingStatus;
use foodbridge_entity::food::FoodStatus;
use foodbridge_entity::request::RequestStatus;
use foodbridge_entity::user::UserRole;

use crate::context::RequestContext;

/// Computes the live summary and manages persisted snapshots.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    analytics_repo: Arc<AnalyticsRepository>,
    user_repo: Arc<UserRepository>,
    food_repo: Arc<FoodRepository>,
    request_repo: Arc<FoodRequestRepository>,
    booking_repo: Arc<BookingRepository>,
    report_repo: Arc<ReportRepository>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(
        analytics_repo: Arc<AnalyticsRepository>,
        user_repo: Arc<UserRepository>,
        food_repo: Arc<FoodRepository>,
        request_repo: Arc<FoodRequestRepository>,
        booking_repo: Arc<BookingRepository>,
        report_repo: Arc<ReportRepository>,
    ) -> Self {
        Self {
            analytics_repo,
            user_repo,
            food_repo,
            request_repo,
            booking_repo,
            report_repo,
        }
    }

    /// Current platform counts, computed on demand. Admin only.
    pub async fn summary(&self, ctx: &RequestContext) -> Result<PlatformSummary, AppError> {
        self.require_admin(ctx)?;

        Ok(PlatformSummary {
            total_users: self.user_repo.count_by_role(None).await?,
            total_donors: self.user_repo.count_by_role(Some(UserRole::Donor)).await?,
            total_receivers: self.user_repo.count_by_role(Some(UserRole::Receiver)).await?,
            pending_approvals: self.user_repo.count_pending_approvals().await?,
            active_listings: self
                .food_repo
                .count_by_status(Some(FoodStatus::Available))
                .await?,
            total_listings: self.food_repo.count_by_status(None).await?,
            foods_donated: self
                .food_repo
                .count_by_status(Some(FoodStatus::PickedUp))
                .await?,
            foods_expired: self
                .food_repo
                .count_by_status(Some(FoodStatus::Expired))
                .await?,
            total_requests: self.request_repo.count_by_status(None).await?,
            pending_requests: self
                .request_repo
                .count_by_status(Some(RequestStatus::Pending))
                .await?,
            completed_requests: self
                .request_repo
                .count_by_status(Some(RequestStatus::Completed))
                .await?,
            total_bookings: self.booking_repo.count_by_status(None).await?,
            completed_bookings: self
                .booking_repo
                .count_by_status(Some(BookingStatus::Completed))
                .await?,
            open_reports: self.report_repo.count_open().await?,
        })
    }

    /// Persists a snapshot for the given period, overwriting any earlier
    /// snapshot for the same date. Admin only.
    pub async fn take_snapshot(
        &self,
        ctx: &RequestContext,
        period: AnalyticsPeriod,
    ) -> Result<AnalyticsSnapshot, AppError> {
        self.require_admin(ctx)?;

        let now = Utc::now();
        let window = match period {
            AnalyticsPeriod::Daily => Duration::days(1),
            AnalyticsPeriod::Weekly => Duration::weeks(1),
            AnalyticsPeriod::Monthly => Duration::days(30),
        };
        let since = now - window;

        let mut foods_by_category = BTreeMap::new();
        for (category, count) in self.food_repo.count_by_category().await? {
            foods_by_category.insert(category.as_str().to_string(), count);
        }

        let snapshot = self
            .analytics_repo
            .upsert(&CreateSnapshot {
                snapshot_date: now.date_naive(),
                period,
                foods_posted: self.food_repo.count_created_since(since).await?,
                foods_donated: self
                    .food_repo
                    .count_by_status(Some(FoodStatus::PickedUp))
                    .await?,
                foods_expired: self
                    .food_repo
                    .count_by_status(Some(FoodStatus::Expired))
                    .await?,
                foods_by_category,
                total_users: self.user_repo.count_by_role(None).await?,
                new_users: self.user_repo.count_created_since(since).await?,
                active_users: self.user_repo.count_active_since(since).await?,
                total_donors: self.user_repo.count_by_role(Some(UserRole::Donor)).await?,
                total_receivers: self
                    .user_repo
                    .count_by_role(Some(UserRole::Receiver))
                    .await?,
                pending_approvals: self.user_repo.count_pending_approvals().await?,
                total_requests: self.request_repo.count_by_status(None).await?,
                approved_requests: self
                    .request_repo
                    .count_by_status(Some(RequestStatus::Approved))
                    .await?,
                rejected_requests: self
                    .request_repo
                    .count_by_status(Some(RequestStatus::Rejected))
                    .await?,
                completed_requests: self
                    .request_repo
                    .count_by_status(Some(RequestStatus::Completed))
                    .await?,
            })
            .await?;

        info!(snapshot_id = %snapshot.id, period = %period.as_str(), "Snapshot persisted");

        Ok(snapshot)
    }

    /// Lists stored snapshots, newest first. Admin only.
    pub async fn list_snapshots(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<AnalyticsSnapshot>, AppError> {
        self.require_admin(ctx)?;
        self.analytics_repo.find_all(page).await
    }

    fn require_admin(&self, ctx: &RequestContext) -> Result<(), AppError> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden("Admin access required"));
        }
        Ok(())
    }
}
