use labsite_core::types::{DbId, Timestamp};
use labsite_core::user::User;
use sqlx::FromRow;

use super::{flag, parse_text};

/// A row from the `users` table, including the password hash. Never
/// serialised; convert to [`User`] before it leaves the repository layer.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: i64,
    pub last_login: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A user together with the stored hash, used only by the login flow.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl UserRow {
    pub fn into_credentials(self) -> Result<UserCredentials, sqlx::Error> {
        let password_hash = self.password_hash.clone();
        Ok(UserCredentials {
            user: User::try_from(self)?,
            password_hash,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            username: row.username,
            name: row.name,
            email: row.email,
            role: parse_text(&row.role)?,
            is_active: flag(row.is_active),
            last_login: row.last_login,
            created_at: row.created_at,
        })
    }
}
