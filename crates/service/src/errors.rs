use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Classify a store error; uniqueness violations become `Conflict`.
    pub fn db(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            _ => Self::Db(e.to_string()),
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Conflict(msg) => Self::Conflict(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_kind() {
        assert!(matches!(ServiceError::from(ModelError::Validation("name required".into())), ServiceError::Validation(m) if m == "name required"));
        assert!(matches!(ServiceError::from(ModelError::Conflict("dup".into())), ServiceError::Conflict(_)));
        assert!(matches!(ServiceError::from(ModelError::Db("boom".into())), ServiceError::Db(_)));
    }

    #[test]
    fn not_found_message_names_entity() {
        assert_eq!(ServiceError::not_found("group").to_string(), "group not found");
    }

    #[test]
    fn non_sql_db_errors_are_generic() {
        let e = ServiceError::db(DbErr::Custom("lost connection".into()));
        assert!(matches!(e, ServiceError::Db(_)));
    }
}
