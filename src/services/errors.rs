use thiserror::Error;

use crate::repository::RepositoryError;

/// Generic error type used by service layer functions.
///
/// Missing records are not errors here: lookups return `Option` and deletes
/// return `bool`, leaving the "not found" mapping to the caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Submitted data failed validation.
    #[error("{0}")]
    Form(String),
    /// A value violated a domain type constraint.
    #[error("{0}")]
    TypeConstraint(String),
    /// The response references a category that does not exist.
    #[error("category {0} does not exist")]
    UnknownCategory(String),
    /// The persistence port failed; passed through untouched.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
