//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::user::model::{CreateUser, UpdateUser};
use foodbridge_entity::user::{ApprovalStatus, User, UserRole};

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// List users filtered by approval status.
    pub async fn find_by_approval_status(
        &self,
        status: ApprovalStatus,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE approval_status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count users", e)
                })?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE approval_status = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list users by approval", e)
        })?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, password_hash, phone, role, \
                                approval_status, organization_name, organization_type, \
                                organization_description, street, city, state, zip_code, \
                                country, latitude, longitude) \
             VALUES ($1, $2, LOWER($3), $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING *",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.phone)
        .bind(data.role)
        .bind(data.approval_status)
        .bind(&data.organization_name)
        .bind(data.organization_type)
        .bind(&data.organization_description)
        .bind(&data.street)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.zip_code)
        .bind(&data.country)
        .bind(data.latitude)
        .bind(data.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update a user's profile fields.
    pub async fn update(&self, user_id: Uuid, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET first_name = COALESCE($2, first_name), \
                              last_name = COALESCE($3, last_name), \
                              phone = COALESCE($4, phone), \
                              organization_name = COALESCE($5, organization_name), \
                              organization_description = COALESCE($6, organization_description), \
                              street = COALESCE($7, street), \
                              city = COALESCE($8, city), \
                              state = COALESCE($9, state), \
                              zip_code = COALESCE($10, zip_code), \
                              country = COALESCE($11, country), \
                              latitude = COALESCE($12, latitude), \
                              longitude = COALESCE($13, longitude), \
                              profile_image_url = COALESCE($14, profile_image_url), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone)
        .bind(&data.organization_name)
        .bind(&data.organization_description)
        .bind(&data.street)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.zip_code)
        .bind(&data.country)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(&data.profile_image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Update a user's password hash.
    pub async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Record an admin approval decision.
    pub async fn update_approval(
        &self,
        user_id: Uuid,
        status: ApprovalStatus,
        approved_by: Uuid,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET approval_status = $2, approved_by = $3, \
                              approval_date = NOW(), updated_at = NOW() \
             WHERE id = $1 AND approval_status = 'pending' RETURNING *",
        )
        .bind(user_id)
        .bind(status)
        .bind(approved_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update approval", e))?
        .ok_or_else(|| {
            AppError::conflict(format!("User {user_id} is not awaiting approval"))
        })
    }

    /// Update last login timestamp.
    pub async fn update_last_login(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }

    /// Fold one rating into the user's accumulator as a single atomic
    /// update; same arithmetic as `foodbridge_entity::rating::fold_rating`.
    pub async fn apply_rating(&self, user_id: Uuid, rating: i16) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                 average_rating = (average_rating * total_ratings + $2) / (total_ratings + 1), \
                 total_ratings = total_ratings + 1, \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(rating as f64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to apply rating", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Count users, optionally by role.
    pub async fn count_by_role(&self, role: Option<UserRole>) -> AppResult<i64> {
        let count: i64 = match role {
            Some(role) => sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
                .bind(role)
                .fetch_one(&self.pool)
                .await,
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        Ok(count)
    }

    /// Count users awaiting approval.
    pub async fn count_pending_approvals(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE approval_status = 'pending'")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count pending approvals", e)
            })
    }

    /// Count users created since the given time.
    pub async fn count_created_since(&self, since: chrono::DateTime<chrono::Utc>) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count new users", e))
    }

    /// Count users active since the given time.
    pub async fn count_active_since(&self, since: chrono::DateTime<chrono::Utc>) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE last_login_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count active users", e)
            })
    }
}
