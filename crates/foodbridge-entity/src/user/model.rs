//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use foodbridge_core::types::geo::GeoPoint;

use super::approval::{ApprovalStatus, OrganizationType};
use super::role::UserRole;

/// A registered user: donor, receiver, or admin.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address (unique, stored lowercase).
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Contact phone number.
    pub phone: String,
    /// Platform role.
    pub role: UserRole,
    /// Account approval state.
    pub approval_status: ApprovalStatus,
    /// The admin who approved or rejected this account.
    pub approved_by: Option<Uuid>,
    /// When the approval decision was made.
    pub approval_date: Option<DateTime<Utc>>,
    /// Organization name, shown instead of the personal name when set.
    pub organization_name: Option<String>,
    /// Kind of organization.
    pub organization_type: Option<OrganizationType>,
    /// Short description of the organization.
    pub organization_description: Option<String>,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
    /// Address latitude, if geocoded.
    pub latitude: Option<f64>,
    /// Address longitude, if geocoded.
    pub longitude: Option<f64>,
    /// Profile image URL.
    pub profile_image_url: Option<String>,
    /// Whether the account passed identity verification.
    pub is_verified: bool,
    /// Incrementally maintained rating mean (0 when unrated).
    pub average_rating: f64,
    /// Number of ratings folded into `average_rating`.
    pub total_ratings: i64,
    /// Completed donations as a donor.
    pub total_donations: i64,
    /// Completed pickups as a receiver.
    pub total_received: i64,
    /// Whether the account is active.
    pub is_active: bool,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full personal name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Name shown to other users: the organization name when present,
    /// otherwise the personal name.
    pub fn display_name(&self) -> String {
        self.organization_name
            .clone()
            .unwrap_or_else(|| self.full_name())
    }

    /// The geocoded address location, if both coordinates are present.
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
            _ => None,
        }
    }

    /// Whether this account may act on the platform right now.
    pub fn can_participate(&self) -> bool {
        self.is_active && self.approval_status == ApprovalStatus::Approved
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    pub phone: String,
    pub role: UserRole,
    pub approval_status: ApprovalStatus,
    pub organization_name: Option<String>,
    pub organization_type: Option<OrganizationType>,
    pub organization_description: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub organization_name: Option<String>,
    pub organization_description: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub profile_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "hash".to_string(),
            phone: "+91 9000000000".to_string(),
            role: UserRole::Donor,
            approval_status: ApprovalStatus::Approved,
            approved_by: None,
            approval_date: None,
            organization_name: None,
            organization_type: None,
            organization_description: None,
            street: "1 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            zip_code: "560001".to_string(),
            country: "India".to_string(),
            latitude: Some(12.9716),
            longitude: Some(77.5946),
            profile_image_url: None,
            is_verified: false,
            average_rating: 0.0,
            total_ratings: 0,
            total_donations: 0,
            total_received: 0,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_organization() {
        let mut user = sample_user();
        assert_eq!(user.display_name(), "Asha Rao");
        user.organization_name = Some("Hope Kitchen".to_string());
        assert_eq!(user.display_name(), "Hope Kitchen");
    }

    #[test]
    fn test_can_participate_requires_approval() {
        let mut user = sample_user();
        assert!(user.can_participate());
        user.approval_status = ApprovalStatus::Pending;
        assert!(!user.can_participate());
        user.approval_status = ApprovalStatus::Approved;
        user.is_active = false;
        assert!(!user.can_participate());
    }
}
