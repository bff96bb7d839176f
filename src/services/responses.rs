use crate::domain::category::Category;
use crate::domain::llm_response::{LlmResponse, NewLlmResponse, ResponseChanges};
use crate::domain::types::ResponseId;
use crate::repository::{
    CategoryReader, LlmResponseReader, LlmResponseWriter, Pagination, ResponseListQuery,
    ResponseSearchQuery,
};

use super::ServiceResult;

/// A response together with the category it is filed under, if that
/// category still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDetail {
    pub response: LlmResponse,
    pub category: Option<Category>,
}

pub fn create_response<R>(new_response: NewLlmResponse, repo: &R) -> ServiceResult<LlmResponse>
where
    R: LlmResponseWriter,
{
    let response = LlmResponse::new(new_response);

    let response = repo.create_response(&response).map_err(|e| {
        log::error!("Failed to create response: {e}");
        e
    })?;

    log::info!("Stored response {} ({})", response.id, response.title);
    Ok(response)
}

/// Newest-first listing.
pub fn list_responses<R>(pagination: Pagination, repo: &R) -> ServiceResult<Vec<LlmResponse>>
where
    R: LlmResponseReader,
{
    log::debug!("Listing responses skip={} limit={}", pagination.skip, pagination.limit);

    let query = ResponseListQuery::new().paginate(pagination.skip, pagination.limit);
    let responses = repo.list_responses(query).map_err(|e| {
        log::error!("Failed to list responses: {e}");
        e
    })?;

    Ok(responses)
}

pub fn search_responses<R>(query: ResponseSearchQuery, repo: &R) -> ServiceResult<Vec<LlmResponse>>
where
    R: LlmResponseReader,
{
    log::debug!(
        "Searching responses query={:?} category={:?} tags={:?}",
        query.query,
        query.category_id,
        query.tags
    );

    let responses = repo.search_responses(query).map_err(|e| {
        log::error!("Failed to search responses: {e}");
        e
    })?;

    Ok(responses)
}

pub fn get_response<R>(id: ResponseId, repo: &R) -> ServiceResult<Option<LlmResponse>>
where
    R: LlmResponseReader,
{
    let response = repo.get_response_by_id(id).map_err(|e| {
        log::error!("Failed to get response {id}: {e}");
        e
    })?;

    Ok(response)
}

/// Like [`get_response`] but also resolves the referenced category.
pub fn show_response<R>(id: ResponseId, repo: &R) -> ServiceResult<Option<ResponseDetail>>
where
    R: LlmResponseReader + CategoryReader,
{
    let Some(response) = get_response(id, repo)? else {
        return Ok(None);
    };

    let category = match response.category_id {
        Some(category_id) => repo.get_category_by_id(category_id).map_err(|e| {
            log::error!("Failed to get category {category_id}: {e}");
            e
        })?,
        None => None,
    };

    Ok(Some(ResponseDetail { response, category }))
}

/// Fetch, merge the supplied changes, persist. `None` when the response is
/// missing.
pub fn update_response<R>(
    id: ResponseId,
    changes: ResponseChanges,
    repo: &R,
) -> ServiceResult<Option<LlmResponse>>
where
    R: LlmResponseReader + LlmResponseWriter,
{
    let Some(response) = get_response(id, repo)? else {
        return Ok(None);
    };

    let response = response.update(changes);
    let response = repo.update_response(&response).map_err(|e| {
        log::error!("Failed to update response {id}: {e}");
        e
    })?;

    Ok(Some(response))
}

pub fn delete_response<R>(id: ResponseId, repo: &R) -> ServiceResult<bool>
where
    R: LlmResponseWriter,
{
    let deleted = repo.delete_response(id).map_err(|e| {
        log::error!("Failed to delete response {id}: {e}");
        e
    })?;

    if deleted {
        log::info!("Deleted response {id}");
    }
    Ok(deleted)
}
