//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use foodbridge_entity::food::{CreateFood, DietaryInfo, FoodCategory};
use foodbridge_entity::report::{
    CreateReport, ReportSeverity, ReportTargetType, ReportType,
};
use foodbridge_entity::request::RequestPriority;
use foodbridge_entity::user::{OrganizationType, UserRole};
use foodbridge_service::auth::RegisterData;

/// Registration payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(min = 5, max = 32))]
    pub phone: String,
    pub role: UserRole,
    pub organization_name: Option<String>,
    pub organization_type: Option<OrganizationType>,
    pub organization_description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub street: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub state: String,
    #[validate(length(min = 1, max = 20))]
    pub zip_code: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<RegisterRequest> for RegisterData {
    fn from(req: RegisterRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            role: req.role,
            organization_name: req.organization_name,
            organization_type: req.organization_type,
            organization_description: req.organization_description,
            street: req.street,
            city: req.city,
            state: req.state,
            zip_code: req.zip_code,
            country: req.country,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}

/// Login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Password change payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// New listing payload. The donor comes from the access token.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(length(min = 3, max = 100))]
    pub title: String,
    #[validate(length(min = 10, max = 1000))]
    pub description: String,
    pub category: FoodCategory,
    #[validate(length(min = 1, max = 100))]
    pub quantity: String,
    #[validate(length(min = 1, max = 200))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub state: String,
    #[validate(length(min = 1, max = 20))]
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub expiry_date: DateTime<Utc>,
    pub available_from: DateTime<Utc>,
    pub available_until: DateTime<Utc>,
    pub pickup_instructions: Option<String>,
    #[serde(default)]
    pub dietary_info: DietaryInfo,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl CreateListingRequest {
    /// Attaches the authenticated donor.
    pub fn into_create_food(self, donor_id: Uuid) -> CreateFood {
        CreateFood {
            donor_id,
            title: self.title,
            description: self.description,
            category: self.category,
            quantity: self.quantity,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            latitude: self.latitude,
            longitude: self.longitude,
            expiry_date: self.expiry_date,
            available_from: self.available_from,
            available_until: self.available_until,
            pickup_instructions: self.pickup_instructions,
            dietary_info: self.dietary_info,
            image_urls: self.image_urls,
        }
    }
}

/// Payload for claiming a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClaimFoodRequest {
    #[validate(length(min = 1, max = 100))]
    pub quantity_requested: String,
    #[validate(length(max = 500))]
    pub message: Option<String>,
    #[serde(default)]
    pub priority: RequestPriority,
    pub preferred_pickup_time: Option<DateTime<Utc>>,
}

/// Admin decision on a pending account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalDecisionRequest {
    pub approve: bool,
}

/// Payload for filing a moderation report.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FileReportRequest {
    pub report_type: ReportType,
    pub target_type: ReportTargetType,
    pub target_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[serde(default)]
    pub severity: ReportSeverity,
}

impl FileReportRequest {
    /// Attaches the authenticated reporter.
    pub fn into_create_report(self, reporter_id: Uuid) -> CreateReport {
        CreateReport {
            reporter_id,
            report_type: self.report_type,
            target_type: self.target_type,
            target_id: self.target_id,
            title: self.title,
            description: self.description,
            severity: self.severity,
        }
    }
}
