//! Repository for the `users` table.
//!
//! Password hashes enter and leave this module only through
//! [`UserCredentials`]; every other function returns the public [`User`].

use chrono::Utc;
use labsite_core::types::{DbId, Timestamp};
use labsite_core::user::{CreateUser, UpdateUser, User, UserRole};

use super::decode_all;
use crate::models::to_flag;
use crate::models::user::{UserCredentials, UserRow};
use crate::DbPool;

/// Column list for `users` queries.
const COLUMNS: &str = "\
    id, username, password_hash, name, email, role, is_active, last_login, created_at";

/// Provides CRUD operations for admin accounts.
pub struct UserRepo;

impl UserRepo {
    /// List every account ordered by username.
    pub async fn list(pool: &DbPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY username, id");
        let rows = sqlx::query_as::<_, UserRow>(&query).fetch_all(pool).await?;
        decode_all(rows)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    /// Look up an account with its stored hash for login.
    pub async fn find_by_username(
        pool: &DbPool,
        username: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await?
            .map(UserRow::into_credentials)
            .transpose()
    }

    /// Insert an account. `password_hash` must already be hashed; a
    /// duplicate username or email surfaces as a unique violation.
    pub async fn create(
        pool: &DbPool,
        input: &CreateUser,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let now = Utc::now();
        let role = input.role.unwrap_or(UserRole::Editor);
        let is_active = input.is_active.unwrap_or(true);
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO users (\
                username, password_hash, name, email, role, is_active, created_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING id",
        )
        .bind(input.username.trim())
        .bind(password_hash)
        .bind(&input.name)
        .bind(&input.email)
        .bind(role.as_str())
        .bind(to_flag(is_active))
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(User {
            id,
            username: input.username.trim().to_string(),
            name: input.name.clone(),
            email: input.email.clone(),
            role,
            is_active,
            last_login: None,
            created_at: now,
        })
    }

    /// Merge the profile fields of `patch`. `password_hash`, when given,
    /// replaces the stored hash.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: &UpdateUser,
        password_hash: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let Some(mut user) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        user.apply(patch);

        let result = sqlx::query(
            "UPDATE users SET \
                name = $1, email = $2, role = $3, is_active = $4, \
                password_hash = COALESCE($5, password_hash), updated_at = $6 \
             WHERE id = $7",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(to_flag(user.is_active))
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Ok((result.rows_affected() > 0).then_some(user))
    }

    /// Stamp `lastLogin` with the current time and return it.
    pub async fn record_login(pool: &DbPool, id: DbId) -> Result<Option<Timestamp>, sqlx::Error> {
        let now = Utc::now();
        let result = sqlx::query("UPDATE users SET last_login = $1 WHERE id = $2")
            .bind(now)
            .bind(id)
            .execute(pool)
            .await?;
        Ok((result.rows_affected() > 0).then_some(now))
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }
}
