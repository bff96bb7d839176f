//! Request payloads and their validation.

use serde::Deserialize;
use validator::Validate;

use crate::repository::{DEFAULT_LIMIT, Pagination};

pub mod categories;
pub mod responses;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// `skip`/`limit` query parameters shared by list endpoints.
#[derive(Debug, Clone, Copy, Deserialize, Validate, PartialEq, Eq)]
pub struct PaginationParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: usize,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<PaginationParams> for Pagination {
    fn from(value: PaginationParams) -> Self {
        Pagination::new(value.skip, value.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_must_stay_within_bounds() {
        assert!(PaginationParams { skip: 0, limit: 0 }.validate().is_err());
        assert!(PaginationParams { skip: 0, limit: 1001 }.validate().is_err());
        assert!(PaginationParams { skip: 5, limit: 1000 }.validate().is_ok());
    }
}
