//! List-page orchestration on top of the repositories.
//!
//! Each function does what one screen does: bind a repository call to a
//! [`crate::pagination::PaginationController`] or validate a payload before
//! handing it to a writer.

use thiserror::Error;
use validator::ValidationErrors;

use crate::repository::errors::RepositoryError;

pub mod kardex;
pub mod patient;
pub mod product;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors.to_string())
    }
}
