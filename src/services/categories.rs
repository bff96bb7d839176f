use crate::domain::category::{Category, CategoryChanges};
use crate::domain::types::CategoryId;
use crate::forms::categories::CreateCategoryPayload;
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, Pagination};

use super::ServiceResult;

pub fn create_category<R>(payload: CreateCategoryPayload, repo: &R) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    let category = Category::new(payload.name, payload.description);

    let category = repo.create_category(&category).map_err(|e| {
        log::error!("Failed to create category: {e}");
        e
    })?;

    log::info!("Created category {} ({})", category.id, category.name);
    Ok(category)
}

pub fn list_categories<R>(pagination: Pagination, repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    log::debug!("Listing categories skip={} limit={}", pagination.skip, pagination.limit);

    let query = CategoryListQuery::new().paginate(pagination.skip, pagination.limit);
    let categories = repo.list_categories(query).map_err(|e| {
        log::error!("Failed to list categories: {e}");
        e
    })?;

    Ok(categories)
}

pub fn get_category<R>(id: CategoryId, repo: &R) -> ServiceResult<Option<Category>>
where
    R: CategoryReader,
{
    let category = repo.get_category_by_id(id).map_err(|e| {
        log::error!("Failed to get category {id}: {e}");
        e
    })?;

    Ok(category)
}

/// Fetch, merge the supplied changes, persist. `None` when the category is
/// missing.
pub fn update_category<R>(
    id: CategoryId,
    changes: CategoryChanges,
    repo: &R,
) -> ServiceResult<Option<Category>>
where
    R: CategoryReader + CategoryWriter,
{
    let Some(category) = get_category(id, repo)? else {
        return Ok(None);
    };

    let category = category.update(changes);
    let category = repo.update_category(&category).map_err(|e| {
        log::error!("Failed to update category {id}: {e}");
        e
    })?;

    Ok(Some(category))
}

/// Deletes the category and every response filed under it.
pub fn delete_category<R>(id: CategoryId, repo: &R) -> ServiceResult<bool>
where
    R: CategoryWriter,
{
    let deleted = repo.delete_category(id).map_err(|e| {
        log::error!("Failed to delete category {id}: {e}");
        e
    })?;

    if deleted {
        log::info!("Deleted category {id}");
    }
    Ok(deleted)
}
