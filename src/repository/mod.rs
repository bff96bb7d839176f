use crate::db::{DbConnection, DbPool};
use crate::domain::category::Category;
use crate::domain::llm_response::LlmResponse;
use crate::domain::types::{CategoryId, ResponseId};

pub mod category;
pub mod errors;
pub mod llm_response;
pub mod memory;

pub use errors::{RepositoryError, RepositoryResult};
pub use memory::InMemoryRepository;

/// Number of records returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 100;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Offset/limit window applied after ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    /// `OFFSET` value for SQL queries, saturating at `i64::MAX`.
    pub(crate) fn sql_offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// `LIMIT` value for SQL queries, saturating at `i64::MAX`.
    pub(crate) fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    /// Slice an already ordered collection.
    pub(crate) fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    pub pagination: Pagination,
}

impl CategoryListQuery {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn paginate(mut self, skip: usize, limit: usize) -> Self {
        self.pagination = Pagination::new(skip, limit);
        self
    }
}

/// Query parameters for listing responses newest-first.
#[derive(Debug, Clone, Default)]
pub struct ResponseListQuery {
    pub pagination: Pagination,
}

impl ResponseListQuery {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn paginate(mut self, skip: usize, limit: usize) -> Self {
        self.pagination = Pagination::new(skip, limit);
        self
    }
}

/// Filters for searching responses. Present filters combine with AND.
#[derive(Debug, Clone, Default)]
pub struct ResponseSearchQuery {
    /// Substring looked up in title, prompt and markdown content.
    pub query: Option<String>,
    /// Exact category match.
    pub category_id: Option<CategoryId>,
    /// Every listed tag must be attached to a match.
    pub tags: Vec<String>,
    pub pagination: Pagination,
}

impl ResponseSearchQuery {
    pub fn new() -> Self {
        Self::default()
    }
    /// Empty strings are treated as no text filter.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
    pub fn paginate(mut self, skip: usize, limit: usize) -> Self {
        self.pagination = Pagination::new(skip, limit);
        self
    }

    /// Whether `response` passes every present filter.
    ///
    /// Text matching is an ASCII case-insensitive substring test, the same
    /// rule SQLite's `LIKE` applies.
    pub fn matches(&self, response: &LlmResponse) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_ascii_lowercase();
            let found = [
                response.title.as_str(),
                response.prompt.as_str(),
                response.content_md.as_str(),
            ]
            .iter()
            .any(|field| field.to_ascii_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        if let Some(category_id) = self.category_id {
            if response.category_id != Some(category_id) {
                return false;
            }
        }

        response.has_all_tags(&self.tags)
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// List categories in creation order.
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return the stored state.
    fn create_category(&self, category: &Category) -> RepositoryResult<Category>;
    /// Write every field of `category` to the matching record.
    ///
    /// When no record matches, the input is returned unchanged.
    fn update_category(&self, category: &Category) -> RepositoryResult<Category>;
    /// Delete a category together with the responses filed under it.
    ///
    /// Returns whether a category was removed.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<bool>;
}

/// Read-only operations for stored responses.
pub trait LlmResponseReader {
    /// Retrieve a response by its identifier.
    fn get_response_by_id(&self, id: ResponseId) -> RepositoryResult<Option<LlmResponse>>;
    /// List responses newest-first.
    fn list_responses(&self, query: ResponseListQuery) -> RepositoryResult<Vec<LlmResponse>>;
    /// Filter responses newest-first, then paginate.
    fn search_responses(&self, query: ResponseSearchQuery)
    -> RepositoryResult<Vec<LlmResponse>>;
}

/// Write operations for stored responses.
pub trait LlmResponseWriter {
    /// Persist a new response and return the stored state.
    fn create_response(&self, response: &LlmResponse) -> RepositoryResult<LlmResponse>;
    /// Write every field of `response` to the matching record.
    ///
    /// When no record matches, the input is returned unchanged.
    fn update_response(&self, response: &LlmResponse) -> RepositoryResult<LlmResponse>;
    /// Returns whether a response was removed.
    fn delete_response(&self, id: ResponseId) -> RepositoryResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_window_saturates_instead_of_wrapping() {
        let pagination = Pagination::new(usize::MAX, usize::MAX);
        assert_eq!(pagination.sql_offset(), i64::MAX);
        assert_eq!(pagination.sql_limit(), i64::MAX);

        let pagination = Pagination::new(10, 5);
        assert_eq!((pagination.sql_offset(), pagination.sql_limit()), (10, 5));
    }
}
