use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => ModelError::Conflict(msg),
            _ => ModelError::Db(e.to_string()),
        }
    }
}

/// Reject empty (after trim) or over-long text for a required column.
pub(crate) fn require_text(field: &str, value: &str, max_chars: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    limit_text(field, value, max_chars)
}

pub(crate) fn limit_text(field: &str, value: &str, max_chars: usize) -> Result<(), ModelError> {
    if value.chars().count() > max_chars {
        return Err(ModelError::Validation(format!("{field} must be at most {max_chars} characters")));
    }
    Ok(())
}
