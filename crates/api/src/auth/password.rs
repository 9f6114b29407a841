//! Credential storage for site accounts.
//!
//! A `users.password_hash` value is an Argon2id PHC string with its own random
//! salt. Plaintext passwords are only ever held for the duration of a request.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use labsite_core::error::CoreError;
use labsite_core::types::DbId;

/// The one message every failed login gets, whatever the cause.
pub fn invalid_credentials() -> CoreError {
    CoreError::Unauthorized("Invalid username or password".to_string())
}

/// Hash a new account password for storage.
pub fn hash_password(password: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CoreError::Internal(format!("Password hashing failed: {err}")))
}

/// Check a login attempt against the hash stored for `user_id`.
///
/// A wrong password is [`invalid_credentials`]. So is a stored value that is
/// not a PHC string, which is also logged because only a bad row write
/// produces one.
pub fn check_password(user_id: DbId, password: &str, stored_hash: &str) -> Result<(), CoreError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| {
        tracing::warn!(user_id, error = %err, "Stored password hash is unreadable");
        invalid_credentials()
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(argon2::password_hash::Error::Password) => Err(invalid_credentials()),
        Err(err) => {
            tracing::warn!(user_id, error = %err, "Password verification failed");
            Err(invalid_credentials())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn stored_hash_accepts_its_password() {
        let hash = hash_password("correct-horse-battery").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(check_password(1, "correct-horse-battery", &hash).is_ok());
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let hash = hash_password("real-password").unwrap();
        let err = check_password(1, "wrong-password", &hash).unwrap_err();
        assert_matches!(err, CoreError::Unauthorized(ref msg) if msg == "Invalid username or password");
    }

    #[test]
    fn each_account_gets_its_own_salt() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn plaintext_left_in_the_column_never_matches() {
        let err = check_password(7, "plaintext-from-old-db", "plaintext-from-old-db").unwrap_err();
        assert_matches!(err, CoreError::Unauthorized(_));
    }
}
