//! Authentication flows: register, login, refresh.

use std::sync::Arc;

use tracing::info;

use foodbridge_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use foodbridge_auth::password::{PasswordHasher, PasswordValidator};
use foodbridge_core::error::AppError;
use foodbridge_database::repositories::user::UserRepository;
use foodbridge_entity::user::model::CreateUser;
use foodbridge_entity::user::{ApprovalStatus, OrganizationType, User, UserRole};

/// Handles registration, login, and token refresh.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

/// Data collected at registration time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: UserRole,
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

/// A successful login: the user plus a fresh token pair.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResult {
    pub user: User,
    pub tokens: TokenPair,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
            decoder,
        }
    }

    /// Registers a new account. Receivers start in the pending approval
    /// queue; donors are approved immediately.
    pub async fn register(&self, data: RegisterData) -> Result<User, AppError> {
        if data.role == UserRole::Admin {
            return Err(AppError::forbidden("Cannot self-register as admin"));
        }
        if !data.email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        self.validator.validate(&data.password)?;

        if self.user_repo.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(&data.password)?;
        let approval_status = ApprovalStatus::initial_for(data.role);

        let user = self
            .user_repo
            .create(&CreateUser {
                first_name: data.first_name,
                last_name: data.last_name,
                email: data.email,
                password_hash,
                phone: data.phone,
                role: data.role,
                approval_status,
                organization_name: data.organization_name,
                organization_type: data.organization_type,
                organization_description: data.organization_description,
                street: data.street,
                city: data.city,
                state: data.state,
                zip_code: data.zip_code,
                country: data.country,
                latitude: data.latitude,
                longitude: data.longitude,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user)
    }

    /// Verifies credentials and issues an access + refresh token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        if !user.is_active {
            return Err(AppError::forbidden("Account is deactivated"));
        }

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.email)?;

        self.user_repo.update_last_login(user.id).await?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResult { user, tokens })
    }

    /// Issues a new access token from a valid refresh token.
    pub async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<(String, chrono::DateTime<chrono::Utc>), AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        // Role may have changed since issuance; re-read it.
        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        if !user.is_active {
            return Err(AppError::forbidden("Account is deactivated"));
        }

        self.encoder
            .generate_access_token(user.id, user.role, &user.email)
    }
}
