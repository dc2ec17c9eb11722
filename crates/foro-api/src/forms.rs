//! Presence checks for submitted form fields. Values are passed on exactly
//! as submitted; only blankness is inspected.

use tracing::warn;

use crate::error::ApiError;

/// A required field: must be present and not blank.
pub fn required(field: &str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => {
            warn!("Rejected submission: missing field '{}'", field);
            Err(ApiError::Validation(format!("missing required field '{}'", field)))
        }
    }
}

/// An optional field: blank counts as absent.
pub fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
