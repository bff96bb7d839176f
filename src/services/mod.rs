//! Use cases orchestrating repository calls.
//!
//! Each function takes the repository it needs as a generic port so it can run
//! against [`DieselRepository`](crate::repository::DieselRepository) or
//! [`InMemoryRepository`](crate::repository::InMemoryRepository).

pub mod categories;
pub mod errors;
pub mod responses;
pub mod validation;

pub use errors::{ServiceError, ServiceResult};
