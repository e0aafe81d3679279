//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates request-level rules (partial updates, reference checks) from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Returns `ServiceError` so the HTTP layer can map outcomes to status codes.

pub mod errors;
pub mod group_service;
pub mod user_service;
#[cfg(test)]
pub mod test_support;
