//! User self-service operations — profile viewing and password changes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use foodbridge_auth::password::{PasswordHasher, PasswordValidator};
use foodbridge_core::error::AppError;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_entity::user::model::UpdateUser;
use foodbridge_entity::user::{OrganizationType, User};

use crate::context::RequestContext;

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
}

/// The subset of a profile visible to other users.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PublicProfile {
    pub id: Uuid,
    pub display_name: String,
    pub organization_type: Option<OrganizationType>,
    pub city: String,
    pub is_verified: bool,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub total_donations: i64,
    pub total_received: i64,
}

impl From<&User> for PublicProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name(),
            organization_type: user.organization_type,
            city: user.city.clone(),
            is_verified: user.is_verified,
            average_rating: user.average_rating,
            total_ratings: user.total_ratings,
            total_donations: user.total_donations,
            total_received: user.total_received,
        }
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
        }
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Gets another user's public profile.
    pub async fn get_public_profile(&self, user_id: Uuid) -> Result<PublicProfile, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        Ok(PublicProfile::from(&user))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        data: UpdateUser,
    ) -> Result<User, AppError> {
        if let Some(first_name) = &data.first_name {
            if first_name.trim().is_empty() {
                return Err(AppError::validation("First name cannot be empty"));
            }
        }
        if let Some(last_name) = &data.last_name {
            if last_name.trim().is_empty() {
                return Err(AppError::validation("Last name cannot be empty"));
            }
        }
        if let (Some(lat), Some(lng)) = (data.latitude, data.longitude) {
            if foodbridge_core::types::geo::GeoPoint::new(lat, lng).is_none() {
                return Err(AppError::validation("Invalid coordinates"));
            }
        }

        let user = self.user_repo.update(ctx.user_id, &data).await?;

        info!(user_id = %ctx.user_id, "Profile updated");

        Ok(user)
    }

    /// Changes the current user's password.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_profile(ctx).await?;

        let valid = self
            .hasher
            .verify_password(current_password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        self.validator.validate(new_password)?;
        self.validator
            .validate_not_same(current_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;

        self.user_repo
            .update_password(ctx.user_id, &new_hash)
            .await?;

        info!(user_id = %ctx.user_id, "Password changed");

        Ok(())
    }
}
