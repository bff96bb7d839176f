//! Cross-entity checks between responses and categories.
//!
//! These checks are advisory: no use case runs them implicitly.

use crate::domain::llm_response::LlmResponse;
use crate::domain::types::CategoryId;
use crate::repository::{CategoryReader, RepositoryResult};
use crate::services::{ServiceError, ServiceResult};

/// Returns `true` when `category_id` is absent or names an existing category.
pub fn validate_category_reference<R>(
    repo: &R,
    category_id: Option<CategoryId>,
) -> RepositoryResult<bool>
where
    R: CategoryReader + ?Sized,
{
    match category_id {
        None => Ok(true),
        Some(id) => Ok(repo.get_category_by_id(id)?.is_some()),
    }
}

/// Returns `true` if the response has no category or its category exists.
pub fn validate_category_exists<R>(repo: &R, response: &LlmResponse) -> RepositoryResult<bool>
where
    R: CategoryReader + ?Sized,
{
    validate_category_reference(repo, response.category_id)
}

/// Fails with [`ServiceError::UnknownCategory`] when `category_id` names a
/// missing category.
pub fn ensure_category_exists<R>(repo: &R, category_id: Option<CategoryId>) -> ServiceResult<()>
where
    R: CategoryReader + ?Sized,
{
    if validate_category_reference(repo, category_id)? {
        return Ok(());
    }
    let id = category_id.map(|id| id.to_string()).unwrap_or_default();
    log::warn!("Rejected reference to unknown category {id}");
    Err(ServiceError::UnknownCategory(id))
}
