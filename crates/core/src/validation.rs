//! Field-level validation and normalisation shared by every entity DTO.

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

/// A patch value for a nullable column.
///
/// `None` leaves the column alone, `Some(None)` clears it and `Some(Some(v))`
/// replaces it. Declare such fields with `#[serde(default, deserialize_with =
/// "nullable")]` so an explicit JSON `null` is told apart from a missing key.
pub type Nullable<T> = Option<Option<T>>;

/// Deserialize a present field, `null` included, as `Some(..)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reject a required text field that is empty or whitespace-only.
pub fn require_text(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::MissingField(field));
    }
    Ok(())
}

/// Validate a patch value for a required text field: absent is fine, present
/// must be non-empty.
pub fn require_patch_text(field: &'static str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) => require_text(field, v),
        None => Ok(()),
    }
}

/// Normalise an optional text field: empty or whitespace-only becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Merge an optional-text patch over the current value.
///
/// Absent keeps the current value, `null` or blank clears it, anything else
/// replaces it.
pub fn merge_optional_text(current: &mut Option<String>, patch: Nullable<String>) {
    if let Some(value) = patch {
        *current = optional_text(value);
    }
}

/// Merge a nullable patch over the current value.
pub fn merge_nullable<T>(current: &mut Option<T>, patch: Nullable<T>) {
    if let Some(value) = patch {
        *current = value;
    }
}

/// Overwrite `current` when the patch carries a value.
pub fn merge<T>(current: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *current = value;
    }
}
