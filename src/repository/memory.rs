use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::category::Category;
use crate::domain::llm_response::LlmResponse;
use crate::domain::types::{CategoryId, ResponseId};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, LlmResponseReader, LlmResponseWriter,
    RepositoryError, RepositoryResult, ResponseListQuery, ResponseSearchQuery,
};

/// Process-local store with the same ordering and filtering rules as
/// [`DieselRepository`](crate::repository::DieselRepository).
///
/// Used by unit tests and by callers that need a throwaway store.
#[derive(Default)]
pub struct InMemoryRepository {
    categories: RwLock<Vec<Category>>,
    responses: RwLock<Vec<LlmResponse>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn duplicate_key(table: &str, id: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Database(DieselError::DatabaseError(
        DatabaseErrorKind::UniqueViolation,
        Box::new(format!("UNIQUE constraint failed: {table}.id ({id})")),
    ))
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        write(&self.categories).extend(categories);
        self
    }

    pub fn with_responses(self, responses: Vec<LlmResponse>) -> Self {
        write(&self.responses).extend(responses);
        self
    }

    /// Responses sorted newest-first, ties broken by descending id.
    fn responses_newest_first(&self) -> Vec<LlmResponse> {
        let mut items = read(&self.responses).clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }
}

impl CategoryReader for InMemoryRepository {
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(read(&self.categories).iter().find(|c| c.id == id).cloned())
    }

    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>> {
        let mut items = read(&self.categories).clone();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(query.pagination.apply(items))
    }
}

impl CategoryWriter for InMemoryRepository {
    fn create_category(&self, category: &Category) -> RepositoryResult<Category> {
        let mut categories = write(&self.categories);
        if categories.iter().any(|c| c.id == category.id) {
            return Err(duplicate_key("categories", category.id));
        }
        categories.push(category.clone());
        Ok(category.clone())
    }

    fn update_category(&self, category: &Category) -> RepositoryResult<Category> {
        let mut categories = write(&self.categories);
        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(stored) => {
                stored.name = category.name.clone();
                stored.description = category.description.clone();
                stored.updated_at = category.updated_at;
                Ok(stored.clone())
            }
            None => Ok(category.clone()),
        }
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<bool> {
        let mut categories = write(&self.categories);
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Ok(false);
        }
        write(&self.responses).retain(|r| r.category_id != Some(id));
        Ok(true)
    }
}

impl LlmResponseReader for InMemoryRepository {
    fn get_response_by_id(&self, id: ResponseId) -> RepositoryResult<Option<LlmResponse>> {
        Ok(read(&self.responses).iter().find(|r| r.id == id).cloned())
    }

    fn list_responses(&self, query: ResponseListQuery) -> RepositoryResult<Vec<LlmResponse>> {
        Ok(query.pagination.apply(self.responses_newest_first()))
    }

    fn search_responses(
        &self,
        query: ResponseSearchQuery,
    ) -> RepositoryResult<Vec<LlmResponse>> {
        let matching = self
            .responses_newest_first()
            .into_iter()
            .filter(|r| query.matches(r));
        Ok(query.pagination.apply(matching))
    }
}

impl LlmResponseWriter for InMemoryRepository {
    fn create_response(&self, response: &LlmResponse) -> RepositoryResult<LlmResponse> {
        let mut responses = write(&self.responses);
        if responses.iter().any(|r| r.id == response.id) {
            return Err(duplicate_key("llm_responses", response.id));
        }
        responses.push(response.clone());
        Ok(response.clone())
    }

    fn update_response(&self, response: &LlmResponse) -> RepositoryResult<LlmResponse> {
        let mut responses = write(&self.responses);
        match responses.iter_mut().find(|r| r.id == response.id) {
            Some(stored) => {
                let created_at = stored.created_at;
                *stored = response.clone();
                stored.created_at = created_at;
                Ok(stored.clone())
            }
            None => Ok(response.clone()),
        }
    }

    fn delete_response(&self, id: ResponseId) -> RepositoryResult<bool> {
        let mut responses = write(&self.responses);
        let before = responses.len();
        responses.retain(|r| r.id != id);
        Ok(responses.len() != before)
    }
}
