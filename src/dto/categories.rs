use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDto {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            name: value.name.into_inner(),
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Short form embedded in response details.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRefDto {
    pub id: CategoryId,
    pub name: String,
}

impl From<Category> for CategoryRefDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            name: value.name.into_inner(),
        }
    }
}
