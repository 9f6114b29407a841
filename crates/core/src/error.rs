use crate::types::DbId;

/// Domain-level failure shared by the repository, handler and client layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }

    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        CoreError::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
