use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

/// Reject blank values and values longer than `max` characters.
pub(crate) fn require_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    check_max_len(field, value, max)
}

pub(crate) fn check_max_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} cannot exceed {max} characters")));
    }
    Ok(())
}
