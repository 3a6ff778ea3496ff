//! Shared field validators used by the per-entity validation functions.
//!
//! Lengths are counted in Unicode scalar values, matching how the columns
//! are sized (`VARCHAR(n)` counts characters, not bytes).

use crate::error::CoreError;

/// Validate a required text field: non-blank and at most `max_len` chars.
pub fn require_text(field: &'static str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "This field may not be blank"));
    }
    check_max_len(field, value, max_len)
}

/// Validate an optional text field. `None` and empty strings are accepted.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max_len: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) => check_max_len(field, v, max_len),
        None => Ok(()),
    }
}

/// Reject values longer than `max_len` characters.
pub fn check_max_len(field: &'static str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(CoreError::validation(
            field,
            format!("Ensure this field has no more than {max_len} characters (it has {len})"),
        ));
    }
    Ok(())
}
