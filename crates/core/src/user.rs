//! Site user accounts.
//!
//! Passwords only ever travel inward (create, update, login). The entity
//! returned to callers carries no password or hash.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};
use crate::validation::{merge, require_patch_text, require_text};

crate::text_enum! {
    pub enum UserRole("role") {
        Admin => "admin",
        Editor => "editor",
    }
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Public user representation (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    /// New plaintext password; hashed before it reaches the store.
    pub password: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Hand-written so passwords never end up in logs.
impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .field("password_changed", &self.password.is_some())
            .finish()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Validate that a password meets the minimum length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<(), CoreError> {
    require_text("username", username)?;
    if username.chars().any(char::is_whitespace) {
        return Err(CoreError::invalid("username", username));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), CoreError> {
    require_text("email", email)?;
    if !email.contains('@') {
        return Err(CoreError::invalid("email", email));
    }
    Ok(())
}

impl CreateUser {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_username(&self.username)?;
        require_text("name", &self.name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

impl UpdateUser {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_patch_text("name", self.name.as_deref())?;
        if let Some(email) = self.email.as_deref() {
            validate_email(email)?;
        }
        if let Some(password) = self.password.as_deref() {
            validate_password(password)?;
        }
        Ok(())
    }
}

impl User {
    /// Merge the profile fields of `patch`. The password is handled by the
    /// caller because it is stored as a hash.
    pub fn apply(&mut self, patch: &UpdateUser) {
        merge(&mut self.name, patch.name.clone());
        merge(&mut self.email, patch.email.clone());
        merge(&mut self.role, patch.role);
        merge(&mut self.is_active, patch.is_active);
    }
}
